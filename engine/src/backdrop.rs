use kurbo::{Point, Vec2};

use crate::animation::Layer;
use crate::config::BackdropConfig;
use crate::error::BackdropError;
use crate::random::RandomSource;
use crate::surface::Surface;
use crate::types::{clamp_extent, Dot, Hsla, Icon, Span};

/// Line between two dots closer than the link distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub alpha: f64,
}

/// Fading opacity of the line joining two dots `distance` apart, `None` at or
/// beyond `threshold`.
pub fn link_alpha(distance: f64, threshold: f64, max_alpha: f64) -> Option<f64> {
    if distance < threshold {
        Some((threshold - distance) / threshold * max_alpha)
    } else {
        None
    }
}

/// Full-viewport field of drifting dots joined by faint lines, with a few
/// spinning glyphs floating among them.
pub struct Backdrop {
    config: BackdropConfig,
    width: f64,
    height: f64,
    dots: Vec<Dot>,
    icons: Vec<Icon>,
}

impl Backdrop {
    pub fn new(
        config: BackdropConfig,
        width: f64,
        height: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, BackdropError> {
        config.validate()?;
        let width = clamp_extent(width);
        let height = clamp_extent(height);
        let across = Span::new(0.0, width);
        let down = Span::new(0.0, height);

        let dot_velocity = Span::symmetric(config.dot_speed);
        let dots: Vec<Dot> = (0..config.dot_count)
            .map(|_| {
                let x = across.sample(rng.next_unit());
                let y = down.sample(rng.next_unit());
                let radius = config.dot_radius.sample(rng.next_unit());
                let vx = dot_velocity.sample(rng.next_unit());
                let vy = dot_velocity.sample(rng.next_unit());
                Dot {
                    position: Point::new(x, y),
                    velocity: Vec2::new(vx, vy),
                    radius,
                    opacity: config.dot_opacity.sample(rng.next_unit()),
                    hue: config.dot_hue.sample(rng.next_unit()),
                }
            })
            .collect();

        let icon_velocity = Span::symmetric(config.icon_speed);
        let spin = Span::symmetric(config.icon_spin);
        let icons: Vec<Icon> = (0..config.icon_count)
            .map(|_| {
                let x = across.sample(rng.next_unit());
                let y = down.sample(rng.next_unit());
                let size = config.icon_size.sample(rng.next_unit());
                let vx = icon_velocity.sample(rng.next_unit());
                let vy = icon_velocity.sample(rng.next_unit());
                let rotation = Span::new(0.0, 360.0).sample(rng.next_unit());
                let rotation_speed = spin.sample(rng.next_unit());
                let opacity = config.icon_opacity.sample(rng.next_unit());
                let glyph = config.glyphs[rng.next_index(config.glyphs.len())].clone();
                Icon {
                    position: Point::new(x, y),
                    velocity: Vec2::new(vx, vy),
                    size,
                    rotation,
                    rotation_speed,
                    opacity,
                    glyph,
                }
            })
            .collect();

        log::debug!("backdrop: {} dots, {} icons over {}x{}", dots.len(), icons.len(), width, height);
        Ok(Backdrop { config, width, height, dots, icons })
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Clears the surface, moves and draws dots, then icons, then the links
    /// between dots.
    pub fn frame(&mut self, surface: &mut dyn Surface) {
        surface.clear();

        let (width, height) = (self.width, self.height);
        for dot in &mut self.dots {
            dot.advance(width, height);
            let color = Hsla {
                hue: dot.hue,
                saturation: self.config.dot_saturation,
                lightness: self.config.dot_lightness,
                alpha: dot.opacity,
            };
            surface.fill_dot(dot.position, dot.radius, color, self.config.glow_blur);
        }

        let margin = self.config.icon_margin;
        for icon in &mut self.icons {
            icon.advance(width, height, margin);
            let font = self.config.font_for(icon.size);
            surface.draw_glyph(&icon.glyph, icon.position, icon.rotation.to_radians(), icon.opacity, &font);
        }

        for link in self.links() {
            let color = Hsla {
                hue: self.config.link_hue,
                saturation: self.config.dot_saturation,
                lightness: self.config.dot_lightness,
                alpha: link.alpha,
            };
            let from = self.dots[link.from].position;
            let to = self.dots[link.to].position;
            surface.stroke_line(from, to, color, self.config.link_width);
        }
    }

    /// Every unordered pair of dots within the link distance.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.dots.iter().enumerate() {
            for (j, b) in self.dots.iter().enumerate().skip(i + 1) {
                let distance = a.position.distance(b.position);
                if let Some(alpha) = link_alpha(distance, self.config.link_distance, self.config.link_opacity) {
                    links.push(Link { from: i, to: j, alpha });
                }
            }
        }
        links
    }
}

impl Layer for Backdrop {
    fn name(&self) -> &'static str {
        "backdrop"
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = clamp_extent(width);
        self.height = clamp_extent(height);
    }

    fn render(&mut self, _now_ms: f64, surface: &mut dyn Surface) {
        self.frame(surface);
    }
}
