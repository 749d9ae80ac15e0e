//! Browser 2D canvas backend

use anyhow::{anyhow, Result};
use glam::Vec2;
use stitchwork_core::geometry::Aabb;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Path, Surface};

const FONT: &str = "12px sans-serif";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Bind to the `<canvas>` element with the given id
    pub fn from_element_id(id: &str) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| anyhow!("Failed to get document"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| anyhow!("Failed to find canvas element with id='{}'", id))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| anyhow!("Element '{}' is not an HTMLCanvasElement", id))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow!("Canvas '{}' has no 2d context", id))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("Context of '{}' is not 2d", id))?;

        Ok(Self { canvas, ctx })
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn trace(&self, points: &[Vec2], closed: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.move_to(first.x as f64, first.y as f64);
        for point in rest {
            self.ctx.line_to(point.x as f64, point.y as f64);
        }
        if closed {
            self.ctx.close_path();
        }
    }
}

fn css(color: Color) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        color[0],
        color[1],
        color[2],
        color[3] as f32 / 255.0
    )
}

impl Surface for CanvasRenderer {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self, color: Color) {
        let size = self.size();
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn stroke(&mut self, path: &Path, width: f32, color: Color) {
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        for subpath in path.subpaths() {
            self.trace(&subpath.points, subpath.closed);
        }
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.begin_path();
        self.trace(points, true);
        self.ctx.fill();
    }

    fn fill_text_centered(&mut self, text: &str, baseline: Vec2, color: Color) {
        self.ctx.set_font(FONT);
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str(&css(color));
        if let Err(e) = self
            .ctx
            .fill_text(text, baseline.x as f64, baseline.y as f64)
        {
            log::warn!("fillText failed: {:?}", e);
        }
    }

    fn measure_text(&mut self, text: &str) -> f32 {
        self.ctx.set_font(FONT);
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            Err(e) => {
                log::warn!("measureText failed: {:?}", e);
                0.0
            }
        }
    }
}
