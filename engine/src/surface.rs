use kurbo::Point;

use crate::types::{Hsla, Rgba};

/// A 2D drawing target sized to the viewport.
pub trait Surface {
    fn resize(&mut self, width: f64, height: f64);
    fn clear(&mut self);
    /// Filled circle with a blurred shadow of the same color. `glow` is the blur radius.
    fn fill_dot(&mut self, center: Point, radius: f64, color: Hsla, glow: f64);
    /// Text centered on `center`, rotated by `angle` radians.
    fn draw_glyph(&mut self, glyph: &str, center: Point, angle: f64, alpha: f64, font: &str);
    fn stroke_line(&mut self, from: Point, to: Point, color: Hsla, width: f64);
    /// Radial gradient from `color` at the center to transparent at `radius`.
    fn fill_orb(&mut self, center: Point, radius: f64, color: Rgba, alpha: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Dot { center: Point, radius: f64, color: Hsla, glow: f64 },
    Glyph { glyph: String, center: Point, angle: f64, alpha: f64, font: String },
    Line { from: Point, to: Point, color: Hsla, width: f64 },
    Orb { center: Point, radius: f64, color: Rgba, alpha: f64 },
}

/// Headless surface that keeps the draw calls of the current frame.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub resizes: usize,
    pub frames: usize,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface { width, height, ..Default::default() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn dots(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Dot { .. }))
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Glyph { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.resizes += 1;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn fill_dot(&mut self, center: Point, radius: f64, color: Hsla, glow: f64) {
        self.commands.push(DrawCommand::Dot { center, radius, color, glow });
    }

    fn draw_glyph(&mut self, glyph: &str, center: Point, angle: f64, alpha: f64, font: &str) {
        self.commands.push(DrawCommand::Glyph {
            glyph: glyph.to_string(),
            center,
            angle,
            alpha,
            font: font.to_string(),
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Hsla, width: f64) {
        self.commands.push(DrawCommand::Line { from, to, color, width });
    }

    fn fill_orb(&mut self, center: Point, radius: f64, color: Rgba, alpha: f64) {
        self.commands.push(DrawCommand::Orb { center, radius, color, alpha });
    }
}
