use std::fmt;

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Half-open `[min, max)` range that initial entity parameters are drawn from.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Span {
        Span { min, max }
    }

    /// `[-magnitude, magnitude)`, the shape every velocity range takes.
    pub const fn symmetric(magnitude: f64) -> Span {
        Span { min: -magnitude, max: magnitude }
    }

    /// Maps a unit sample in `[0, 1)` onto the span.
    pub fn sample(&self, unit: f64) -> f64 {
        self.min + unit * (self.max - self.min)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64, // percent
    pub lightness: f64,  // percent
    pub alpha: f64,
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsla({}, {}%, {}%, {})", self.hue, self.saturation, self.lightness, self.alpha)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Rgba {
        Rgba { r, g, b, a }
    }

    pub fn transparent(self) -> Rgba {
        Rgba { a: 0.0, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A drifting particle. Everything but `position` is fixed at creation.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Dot {
    pub position: Point,
    pub velocity: Vec2,
    pub radius: f64,
    pub opacity: f64,
    pub hue: f64,
}

impl Dot {
    /// Moves the dot one frame and wraps it into `[0, width] x [0, height]`.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.position += self.velocity;
        self.position.x = wrap(self.position.x, 0.0, width);
        self.position.y = wrap(self.position.y, 0.0, height);
    }
}

/// A drifting, spinning glyph.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Icon {
    pub position: Point,
    pub velocity: Vec2,
    pub size: f64,
    pub rotation: f64,       // degrees, never normalized
    pub rotation_speed: f64, // degrees per frame
    pub opacity: f64,
    pub glyph: String,
}

impl Icon {
    /// Moves and spins the icon one frame. Icons wrap `margin` units outside the
    /// viewport so they leave it entirely before reappearing on the other side.
    pub fn advance(&mut self, width: f64, height: f64, margin: f64) {
        self.position += self.velocity;
        self.position.x = wrap(self.position.x, -margin, width + margin);
        self.position.y = wrap(self.position.y, -margin, height + margin);
        self.rotation += self.rotation_speed;
    }
}

/// Past `low` jumps to `high` and past `high` jumps to `low`.
pub fn wrap(value: f64, low: f64, high: f64) -> f64 {
    if value < low {
        high
    } else if value > high {
        low
    } else {
        value
    }
}

/// Viewport extent usable for layout: negative, NaN and infinite sizes become 0.
pub fn clamp_extent(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot_at(x: f64, y: f64) -> Dot {
        Dot {
            position: Point::new(x, y),
            velocity: Vec2::ZERO,
            radius: 2.0,
            opacity: 0.3,
            hue: 230.0,
        }
    }

    fn icon_at(x: f64, y: f64) -> Icon {
        Icon {
            position: Point::new(x, y),
            velocity: Vec2::ZERO,
            size: 20.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            opacity: 0.1,
            glyph: "📚".to_string(),
        }
    }

    #[test]
    fn test_dot_wraps_each_edge() {
        let mut dot = dot_at(-0.01, 300.0);
        dot.advance(800.0, 600.0);
        assert_eq!(dot.position, Point::new(800.0, 300.0));

        let mut dot = dot_at(800.01, 300.0);
        dot.advance(800.0, 600.0);
        assert_eq!(dot.position, Point::new(0.0, 300.0));

        let mut dot = dot_at(400.0, -0.01);
        dot.advance(800.0, 600.0);
        assert_eq!(dot.position, Point::new(400.0, 600.0));

        let mut dot = dot_at(400.0, 600.01);
        dot.advance(800.0, 600.0);
        assert_eq!(dot.position, Point::new(400.0, 0.0));
    }

    #[test]
    fn test_dot_on_the_edge_stays() {
        let mut dot = dot_at(800.0, 0.0);
        dot.advance(800.0, 600.0);
        assert_eq!(dot.position, Point::new(800.0, 0.0));
    }

    #[test]
    fn test_dot_moves_before_wrapping() {
        let mut dot = dot_at(0.1, 599.9);
        dot.velocity = Vec2::new(-0.2, 0.2);
        dot.advance(800.0, 600.0);
        assert_eq!(dot.position, Point::new(800.0, 0.0));
    }

    #[test]
    fn test_icon_wraps_with_margin() {
        let mut icon = icon_at(-50.01, 100.0);
        icon.advance(800.0, 600.0, 50.0);
        assert_eq!(icon.position, Point::new(850.0, 100.0));

        let mut icon = icon_at(850.01, 100.0);
        icon.advance(800.0, 600.0, 50.0);
        assert_eq!(icon.position, Point::new(-50.0, 100.0));

        let mut icon = icon_at(100.0, -50.01);
        icon.advance(800.0, 600.0, 50.0);
        assert_eq!(icon.position, Point::new(100.0, 650.0));

        let mut icon = icon_at(100.0, 650.01);
        icon.advance(800.0, 600.0, 50.0);
        assert_eq!(icon.position, Point::new(100.0, -50.0));

        // inside the margin band nothing happens
        let mut icon = icon_at(-49.0, 640.0);
        icon.advance(800.0, 600.0, 50.0);
        assert_eq!(icon.position, Point::new(-49.0, 640.0));
    }

    #[test]
    fn test_icon_rotation_accumulates() {
        let mut icon = icon_at(100.0, 100.0);
        icon.rotation = 350.0;
        icon.rotation_speed = 0.75;
        for _ in 0..40 {
            icon.advance(800.0, 600.0, 50.0);
        }
        assert!((icon.rotation - 380.0).abs() < 1e-9);
    }

    #[test]
    fn test_span_sample() {
        let span = Span::symmetric(0.25);
        assert_eq!(span.sample(0.0), -0.25);
        assert_eq!(span.sample(0.5), 0.0);
        assert!(span.contains(span.sample(0.999_999)));
        assert!(!Span::new(2.0, 1.0).is_well_formed());
        assert!(!Span::new(f64::NAN, 1.0).is_well_formed());
    }

    #[test]
    fn test_color_css() {
        let color = Hsla { hue: 220.0, saturation: 70.0, lightness: 60.0, alpha: 0.05 };
        assert_eq!(color.to_string(), "hsla(220, 70%, 60%, 0.05)");
        assert_eq!(Rgba::new(59, 130, 246, 0.4).to_string(), "rgba(59, 130, 246, 0.4)");
        assert_eq!(Rgba::new(59, 130, 246, 0.4).transparent().to_string(), "rgba(59, 130, 246, 0)");
    }

    #[test]
    fn test_clamp_extent() {
        assert_eq!(clamp_extent(640.0), 640.0);
        assert_eq!(clamp_extent(-3.0), 0.0);
        assert_eq!(clamp_extent(f64::NAN), 0.0);
        assert_eq!(clamp_extent(f64::INFINITY), 0.0);
        assert_eq!(clamp_extent(f64::NEG_INFINITY), 0.0);
    }
}
