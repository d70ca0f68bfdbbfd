//! Chart rasterizer for visual questions.
//!
//! A [`ChartInstruction`] is validated into a [`ChartSpec`], drawn onto an
//! in-memory canvas and encoded as a base64 PNG suitable for a data URI.

mod canvas;
mod draw;
mod font;
mod instruction;
mod scale;
mod spec;

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

pub use draw::{HEIGHT, WIDTH};
pub use instruction::ChartInstruction;
pub(crate) use instruction::{string_list, value_to_text};
pub use spec::{CategorySeries, ChartBody, ChartSpec, PointSeries, TableData};

/// Errors that can occur while turning an instruction into an image.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Instruction is not a valid chart description: {0}")]
    InvalidInstruction(#[from] serde_json::Error),

    #[error("Unsupported chart type '{0}'")]
    UnsupportedType(String),

    #[error("Chart has no data in '{0}'")]
    EmptyData(&'static str),

    #[error("Chart has {labels} labels for {values} values")]
    LengthMismatch { labels: usize, values: usize },

    #[error("Value {value:?} at {field}[{index}] is not a finite number")]
    NonNumeric {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("Invalid chart data: {0}")]
    InvalidData(String),

    #[error("Failed to encode chart image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Draw `spec` and return it as base64-encoded PNG bytes.
pub fn render_png_base64(spec: &ChartSpec, fallback_title: &str) -> Result<String, ChartError> {
    let canvas = draw::draw(spec, fallback_title)?;
    let image = DynamicImage::ImageRgb8(canvas.into_image());

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(STANDARD.encode(bytes))
}
