//! Pixel drawing primitives over an RGB image buffer.

use image::{Rgb, RgbImage};

use super::font::{char_advance, glyph, GLYPH_HEIGHT};

pub type Color = Rgb<u8>;

pub const WHITE: Color = Rgb([255, 255, 255]);
pub const INK: Color = Rgb([33, 37, 41]);
pub const AXIS: Color = Rgb([90, 96, 104]);
pub const GRID: Color = Rgb([222, 226, 230]);
pub const HEADER_FILL: Color = Rgb([233, 236, 239]);

/// Series colours, cycled by index.
pub const PALETTE: [Color; 8] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
    Rgb([227, 119, 194]),
    Rgb([23, 190, 207]),
];

pub fn palette(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, WHITE),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Set one pixel; coordinates outside the image are ignored.
    pub fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color) {
        for py in y..y + height {
            for px in x..x + width {
                self.put(px, py, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color) {
        self.line(x, y, x + width - 1, y, color);
        self.line(x, y + height - 1, x + width - 1, y + height - 1, color);
        self.line(x, y, x, y + height - 1, color);
        self.line(x + width - 1, y, x + width - 1, y + height - 1, color);
    }

    /// One-pixel line (Bresenham).
    pub fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Line drawn `thickness` pixels wide by stamping squares along it.
    pub fn thick_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, thickness: i64, color: Color) {
        let half = thickness / 2;
        for offset_y in -half..thickness - half {
            for offset_x in -half..thickness - half {
                self.line(x0 + offset_x, y0 + offset_y, x1 + offset_x, y1 + offset_y, color);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Color) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Fill the wedge between `start` and `end` radians, measured clockwise
    /// from twelve o'clock.
    pub fn fill_wedge(&mut self, cx: i64, cy: i64, radius: i64, start: f64, end: f64, color: Color) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let mut angle = (dx as f64).atan2(-(dy as f64));
                if angle < 0.0 {
                    angle += std::f64::consts::TAU;
                }
                if angle >= start && angle < end {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Color) {
        let scale_i = i64::from(scale);
        let mut cursor = x;
        for c in text.chars() {
            for (row, bits) in glyph(c).iter().enumerate() {
                for (col, bit) in bits.chars().enumerate() {
                    if bit == '#' {
                        self.fill_rect(
                            cursor + col as i64 * scale_i,
                            y + row as i64 * scale_i,
                            scale_i,
                            scale_i,
                            color,
                        );
                    }
                }
            }
            cursor += i64::from(char_advance(scale));
        }
    }

    /// Draw `text` rotated a quarter turn counter-clockwise, reading bottom
    /// to top, with its bottom-left corner at (x, y).
    pub fn text_vertical(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Color) {
        let scale_i = i64::from(scale);
        let mut cursor = y;
        for c in text.chars() {
            for (row, bits) in glyph(c).iter().enumerate() {
                for (col, bit) in bits.chars().enumerate() {
                    if bit == '#' {
                        self.fill_rect(
                            x + row as i64 * scale_i,
                            cursor - (col as i64 + 1) * scale_i,
                            scale_i,
                            scale_i,
                            color,
                        );
                    }
                }
            }
            cursor -= i64::from(char_advance(scale));
        }
    }

    pub fn text_height(scale: u32) -> u32 {
        GLYPH_HEIGHT * scale
    }
}
