//! CPU pixel buffer renderer for headless screenshots
//!
//! Draws into an RGBA buffer without any browser or GPU dependency.

use std::path::Path as FsPath;

use anyhow::{Context, Result};
use glam::{IVec2, Vec2};
use stitchwork_core::geometry::{point_in_polygon, Aabb};

use super::{Color, Path, Surface};

/// Glyph advance: 5 pixels wide plus 1 pixel spacing
const GLYPH_ADVANCE: i32 = 6;
const GLYPH_HEIGHT: i32 = 7;

/// CPU renderer that outputs to a pixel buffer
pub struct PixelRenderer {
    /// Width of the viewport in pixels
    pub width: usize,
    /// Height of the viewport in pixels
    pub height: usize,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
}

impl PixelRenderer {
    /// Create a new pixel renderer with given viewport size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![0u8; width * height * 4],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some([
            self.buffer[idx],
            self.buffer[idx + 1],
            self.buffer[idx + 2],
            self.buffer[idx + 3],
        ])
    }

    /// Blend a single pixel at screen coordinates (source-over)
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let alpha = color[3] as u32;
        for channel in 0..3 {
            let dst = self.buffer[idx + channel] as u32;
            let src = color[channel] as u32;
            self.buffer[idx + channel] = ((src * alpha + dst * (255 - alpha)) / 255) as u8;
        }
        self.buffer[idx + 3] = 255;
    }

    /// Draw a filled circle at screen coordinates
    pub fn draw_filled_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw a line using Bresenham's algorithm, stamping a disc of `radius`
    /// at every step when the line is thicker than one pixel
    fn draw_thick_line(&mut self, from: IVec2, to: IVec2, radius: i32, color: Color) {
        let (x1, y1) = (to.x, to.y);
        let dx = (x1 - from.x).abs();
        let dy = -(y1 - from.y).abs();
        let sx = if from.x < x1 { 1 } else { -1 };
        let sy = if from.y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = from.x;
        let mut y = from.y;

        loop {
            if radius > 0 {
                self.draw_filled_circle(x, y, radius, color);
            } else {
                self.set_pixel(x, y, color);
            }
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

    /// Draw text using a simple 5x7 bitmap font
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let mut cursor_x = x;
        for c in text.chars() {
            self.draw_char(cursor_x, y, c, color);
            cursor_x += GLYPH_ADVANCE;
        }
    }

    fn draw_char(&mut self, x: i32, y: i32, c: char, color: Color) {
        let glyph = font_glyph(c);
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..5 {
                if bits & (1 << (4 - col)) != 0 {
                    self.set_pixel(x + col, y + row as i32, color);
                }
            }
        }
    }

    /// Save the buffer as a PNG file
    pub fn save_png(&self, path: impl AsRef<FsPath>) -> Result<()> {
        use image::{ImageBuffer, Rgba};

        let path = path.as_ref();
        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(self.width as u32, self.height as u32, self.buffer.clone())
                .context("Failed to create image from buffer")?;

        img.save(path)
            .with_context(|| format!("Failed to save screenshot: {}", path.display()))?;

        Ok(())
    }
}

impl Surface for PixelRenderer {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self, color: Color) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn stroke(&mut self, path: &Path, width: f32, color: Color) {
        let radius = (width / 2.0).floor() as i32;
        for subpath in path.subpaths() {
            let points = &subpath.points;
            let closing = subpath.closed && points.len() > 2;
            let segments = points
                .windows(2)
                .map(|pair| (pair[0], pair[1]))
                .chain(closing.then(|| (points[points.len() - 1], points[0])));

            for (a, b) in segments {
                self.draw_thick_line(a.round().as_ivec2(), b.round().as_ivec2(), radius, color);
            }
        }
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        let x0 = rect.min.x.round() as i32;
        let y0 = rect.min.y.round() as i32;
        let x1 = rect.max.x.round() as i32;
        let y1 = rect.max.y.round() as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let Some(bounds) = points
            .iter()
            .map(|p| Aabb::new(*p, *p))
            .reduce(|acc, b| acc.union(b))
        else {
            return;
        };
        for y in bounds.min.y.floor() as i32..=bounds.max.y.ceil() as i32 {
            for x in bounds.min.x.floor() as i32..=bounds.max.x.ceil() as i32 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if point_in_polygon(center, points) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    fn fill_text_centered(&mut self, text: &str, baseline: Vec2, color: Color) {
        let width = self.measure_text(text) as i32;
        let x = baseline.x.round() as i32 - width / 2;
        let y = baseline.y.round() as i32 - GLYPH_HEIGHT;
        self.draw_text(x, y, text, color);
    }

    fn measure_text(&mut self, text: &str) -> f32 {
        let chars = text.chars().count() as i32;
        (chars * GLYPH_ADVANCE - 1).max(0) as f32
    }
}

/// 5x7 bitmap glyph; each byte is one row, bits 4-0 are columns left-to-right
fn font_glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        ' ' => [0; 7],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111], // Box for unknown
    }
}
