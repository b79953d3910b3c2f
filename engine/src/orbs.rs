use kurbo::{CubicBez, ParamCurve, Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::animation::Layer;
use crate::error::{self, BackdropError};
use crate::surface::Surface;
use crate::types::{clamp_extent, Rgba};

/// Offset of an orb's box from one viewport edge, as a fraction of the viewport.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    Start(f64), // from the left / top edge
    End(f64),   // from the right / bottom edge
}

impl Anchor {
    fn resolve(self, extent: f64, diameter: f64) -> f64 {
        match self {
            Anchor::Start(fraction) => fraction * extent,
            Anchor::End(fraction) => extent - fraction * extent - diameter,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Orb {
    pub diameter: f64,
    pub color: Rgba,
    pub opacity: f64,
    pub horizontal: Anchor,
    pub vertical: Anchor,
    pub period_ms: f64,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OrbConfig {
    pub orbs: Vec<Orb>,
    pub resize_debounce_ms: f64,
}

impl Default for OrbConfig {
    fn default() -> Self {
        OrbConfig {
            orbs: vec![
                Orb {
                    diameter: 384.0,
                    color: Rgba::new(59, 130, 246, 0.4),
                    opacity: 0.2,
                    horizontal: Anchor::Start(0.1),
                    vertical: Anchor::Start(0.1),
                    period_ms: 8000.0,
                    reverse: false,
                },
                Orb {
                    diameter: 320.0,
                    color: Rgba::new(139, 92, 246, 0.3),
                    opacity: 0.15,
                    horizontal: Anchor::End(0.15),
                    vertical: Anchor::Start(0.6),
                    period_ms: 10000.0,
                    reverse: true,
                },
                Orb {
                    diameter: 256.0,
                    color: Rgba::new(16, 185, 129, 0.3),
                    opacity: 0.1,
                    horizontal: Anchor::Start(0.2),
                    vertical: Anchor::End(0.2),
                    period_ms: 12000.0,
                    reverse: false,
                },
                Orb {
                    diameter: 288.0,
                    color: Rgba::new(245, 158, 11, 0.2),
                    opacity: 0.15,
                    horizontal: Anchor::End(0.3),
                    vertical: Anchor::Start(0.3),
                    period_ms: 9000.0,
                    reverse: true,
                },
            ],
            resize_debounce_ms: 100.0,
        }
    }
}

impl OrbConfig {
    pub fn from_json(json: &str) -> Result<Self, BackdropError> {
        let config: OrbConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BackdropError> {
        error::non_negative("resizeDebounceMs", self.resize_debounce_ms)?;
        for (index, orb) in self.orbs.iter().enumerate() {
            if !(orb.diameter.is_finite() && orb.diameter > 0.0) {
                return Err(BackdropError::InvalidOrb { index, reason: "diameter must be positive" });
            }
            if !(orb.period_ms.is_finite() && orb.period_ms > 0.0) {
                return Err(BackdropError::InvalidOrb { index, reason: "period must be positive" });
            }
            error::opacity("opacity", orb.opacity)?;
            error::opacity("color.a", orb.color.a)?;
        }
        Ok(())
    }
}

/// (offset, scale) at 0%, 25%, 50%, 75% and 100% of one float cycle.
const FLOAT_PATH: [(Vec2, f64); 5] = [
    (Vec2::new(0.0, 0.0), 1.0),
    (Vec2::new(10.0, -20.0), 1.05),
    (Vec2::new(-15.0, -10.0), 0.95),
    (Vec2::new(5.0, -30.0), 1.02),
    (Vec2::new(0.0, 0.0), 1.0),
];

/// CSS `ease-in-out`, i.e. `cubic-bezier(0.42, 0, 0.58, 1)`.
pub fn ease_in_out(progress: f64) -> f64 {
    let curve = CubicBez::new((0.0, 0.0), (0.42, 0.0), (0.58, 1.0), (1.0, 1.0));
    let target = progress.clamp(0.0, 1.0);
    // x(t) is monotonic on [0, 1]
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..40 {
        let mid = (lo + hi) / 2.0;
        if curve.eval(mid).x < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    curve.eval((lo + hi) / 2.0).y
}

/// Offset and scale along the float path at `progress` in `[0, 1]`.
pub fn float_offset(progress: f64) -> (Vec2, f64) {
    let scaled = progress.clamp(0.0, 1.0) * 4.0;
    let segment = (scaled.floor() as usize).min(3);
    let local = ease_in_out(scaled - segment as f64);
    let (from_offset, from_scale) = FLOAT_PATH[segment];
    let (to_offset, to_scale) = FLOAT_PATH[segment + 1];
    (from_offset.lerp(to_offset, local), from_scale + (to_scale - from_scale) * local)
}

/// Large soft color glows that bob gently behind everything else.
pub struct OrbField {
    orbs: Vec<Orb>,
    width: f64,
    height: f64,
    origin_ms: Option<f64>,
}

impl OrbField {
    pub fn new(config: OrbConfig, width: f64, height: f64) -> Result<Self, BackdropError> {
        config.validate()?;
        Ok(OrbField {
            orbs: config.orbs,
            width: clamp_extent(width),
            height: clamp_extent(height),
            origin_ms: None,
        })
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    /// Center and radius of orb `index` after `elapsed_ms` of animation.
    pub fn placement(&self, index: usize, elapsed_ms: f64) -> Option<(Point, f64)> {
        let orb = self.orbs.get(index)?;
        let mut progress = (elapsed_ms.max(0.0) % orb.period_ms) / orb.period_ms;
        if orb.reverse {
            progress = 1.0 - progress;
        }
        let (offset, scale) = float_offset(progress);
        let half = orb.diameter / 2.0;
        let corner = Point::new(
            orb.horizontal.resolve(self.width, orb.diameter),
            orb.vertical.resolve(self.height, orb.diameter),
        );
        Some((corner + Vec2::new(half, half) + offset, half * scale))
    }
}

impl Layer for OrbField {
    fn name(&self) -> &'static str {
        "orbs"
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = clamp_extent(width);
        self.height = clamp_extent(height);
    }

    fn render(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let elapsed = now_ms - origin;
        surface.clear();
        for (index, orb) in self.orbs.iter().enumerate() {
            if let Some((center, radius)) = self.placement(index, elapsed) {
                surface.fill_orb(center, radius, orb.color, orb.opacity);
            }
        }
    }
}
