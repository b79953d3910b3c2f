use std::f64::consts::PI;

use kurbo::Point;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::surface::Surface;
use crate::types::{Hsla, Rgba};

/// [`Surface`] backed by a `<canvas>` 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the canvas can't hand out a 2D context.
    pub fn acquire(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface { canvas, ctx })
    }

    /// Fixes the canvas over the whole viewport, below all content and
    /// transparent to input.
    pub fn pin_behind(&self, z_index: i32) {
        let style = self.canvas.style();
        let z_index = z_index.to_string();
        for (name, value) in [
            ("position", "fixed"),
            ("inset", "0"),
            ("pointer-events", "none"),
            ("z-index", z_index.as_str()),
        ] {
            if let Err(e) = style.set_property(name, value) {
                log::warn!("canvas style {}: {:?}", name, e);
            }
        }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear(&mut self) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_dot(&mut self, center: Point, radius: f64, color: Hsla, glow: f64) {
        let color = color.to_string();
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, PI * 2.0);
        self.ctx.set_fill_style_str(&color);
        self.ctx.fill();
        // second pass paints the glow
        self.ctx.set_shadow_blur(glow);
        self.ctx.set_shadow_color(&color);
        self.ctx.fill();
        self.ctx.set_shadow_blur(0.0);
    }

    fn draw_glyph(&mut self, glyph: &str, center: Point, angle: f64, alpha: f64, font: &str) {
        self.ctx.save();
        let _ = self.ctx.translate(center.x, center.y);
        let _ = self.ctx.rotate(angle);
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(glyph, 0.0, 0.0);
        self.ctx.restore();
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Hsla, width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_orb(&mut self, center: Point, radius: f64, color: Rgba, alpha: f64) {
        let Ok(grad) = self.ctx.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius) else {
            return;
        };
        let _ = grad.add_color_stop(0.0, &color.to_string());
        let _ = grad.add_color_stop(1.0, &color.transparent().to_string());
        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style(&grad);
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, PI * 2.0);
        self.ctx.fill();
        self.ctx.restore();
    }
}
