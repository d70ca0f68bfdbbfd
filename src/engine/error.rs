//! Error types for question generation and visualization.

use thiserror::Error;

use crate::chart::ChartError;
use crate::provider::LlmError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The provider call itself failed
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model replied, but not with the requested JSON structure
    #[error("Model reply could not be parsed: {0}")]
    MalformedReply(String),

    /// The chart instruction could not be drawn
    #[error(transparent)]
    Chart(#[from] ChartError),
}
