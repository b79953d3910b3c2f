use serde::{Deserialize, Serialize};

use crate::error::{self, BackdropError};
use crate::types::Span;

pub const DEFAULT_GLYPHS: [&str; 10] = ["📚", "🎓", "📝", "🧮", "⚗️", "🔬", "📐", "🖊️", "💡", "🧪"];

/// Tunables of the particle backdrop. The defaults reproduce the reference look.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
    pub dot_count: usize,
    pub dot_speed: f64, // max |velocity| per axis, units per frame
    pub dot_radius: Span,
    pub dot_opacity: Span,
    pub dot_hue: Span,
    pub dot_saturation: f64,
    pub dot_lightness: f64,
    pub glow_blur: f64,

    pub icon_count: usize,
    pub icon_speed: f64,
    pub icon_size: Span,
    pub icon_spin: f64, // max |rotation speed|, degrees per frame
    pub icon_opacity: Span,
    pub icon_margin: f64,
    pub icon_font: String,
    pub glyphs: Vec<String>,

    pub link_distance: f64,
    pub link_opacity: f64,
    pub link_hue: f64,
    pub link_width: f64,

    pub resize_debounce_ms: f64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        BackdropConfig {
            dot_count: 50,
            dot_speed: 0.25,
            dot_radius: Span::new(1.0, 4.0),
            dot_opacity: Span::new(0.1, 0.6),
            dot_hue: Span::new(200.0, 260.0),
            dot_saturation: 70.0,
            dot_lightness: 60.0,
            glow_blur: 10.0,
            icon_count: 8,
            icon_speed: 0.15,
            icon_size: Span::new(15.0, 35.0),
            icon_spin: 1.0,
            icon_opacity: Span::new(0.05, 0.2),
            icon_margin: 50.0,
            icon_font: "Arial".to_string(),
            glyphs: DEFAULT_GLYPHS.iter().map(|g| g.to_string()).collect(),
            link_distance: 150.0,
            link_opacity: 0.1,
            link_hue: 220.0,
            link_width: 1.0,
            resize_debounce_ms: 100.0,
        }
    }
}

impl BackdropConfig {
    pub fn from_json(json: &str) -> Result<Self, BackdropError> {
        let config: BackdropConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BackdropError> {
        for (field, span) in [
            ("dotRadius", self.dot_radius),
            ("dotOpacity", self.dot_opacity),
            ("dotHue", self.dot_hue),
            ("iconSize", self.icon_size),
            ("iconOpacity", self.icon_opacity),
        ] {
            if !span.is_well_formed() {
                return Err(BackdropError::InvalidSpan { field, min: span.min, max: span.max });
            }
        }
        for (field, span) in [("dotOpacity", self.dot_opacity), ("iconOpacity", self.icon_opacity)] {
            error::opacity(field, span.min)?;
            error::opacity(field, span.max)?;
        }
        error::opacity("linkOpacity", self.link_opacity)?;

        error::non_negative("dotSpeed", self.dot_speed)?;
        error::non_negative("dotRadius", self.dot_radius.min)?;
        error::non_negative("glowBlur", self.glow_blur)?;
        error::non_negative("iconSpeed", self.icon_speed)?;
        error::non_negative("iconSize", self.icon_size.min)?;
        error::non_negative("iconSpin", self.icon_spin)?;
        error::non_negative("iconMargin", self.icon_margin)?;
        error::non_negative("linkDistance", self.link_distance)?;
        error::non_negative("linkWidth", self.link_width)?;
        error::non_negative("resizeDebounceMs", self.resize_debounce_ms)?;

        if self.icon_count > 0 && self.glyphs.is_empty() {
            return Err(BackdropError::EmptyGlyphs(self.icon_count));
        }
        Ok(())
    }

    /// CSS font shorthand for an icon of the given size.
    pub fn font_for(&self, size: f64) -> String {
        format!("{}px {}", size, self.icon_font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BackdropConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dot_count, 50);
        assert_eq!(config.icon_count, 8);
        assert!(config.glyphs.len() >= 8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BackdropConfig::from_json(r#"{"dotCount": 120, "linkHue": 300}"#).unwrap();
        assert_eq!(config.dot_count, 120);
        assert_eq!(config.link_hue, 300.0);
        assert_eq!(config.icon_count, 8);
        assert_eq!(config.link_distance, 150.0);
    }

    #[test]
    fn test_rejects_inverted_span() {
        let err = BackdropConfig::from_json(r#"{"dotHue": {"min": 260, "max": 200}}"#).unwrap_err();
        assert_eq!(err, BackdropError::InvalidSpan { field: "dotHue", min: 260.0, max: 200.0 });
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = BackdropConfig { icon_speed: -1.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(BackdropError::NegativeValue { field: "iconSpeed", .. })));
    }

    #[test]
    fn test_rejects_bad_opacity() {
        let config = BackdropConfig { link_opacity: 1.5, ..Default::default() };
        assert!(matches!(config.validate(), Err(BackdropError::InvalidOpacity { field: "linkOpacity", .. })));
    }

    #[test]
    fn test_empty_palette_only_matters_with_icons() {
        let config = BackdropConfig { glyphs: vec![], ..Default::default() };
        assert_eq!(config.validate(), Err(BackdropError::EmptyGlyphs(8)));

        let config = BackdropConfig { glyphs: vec![], icon_count: 0, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(BackdropConfig::from_json("{"), Err(BackdropError::InvalidOptions(_))));
    }

    #[test]
    fn test_font_for() {
        assert_eq!(BackdropConfig::default().font_for(20.5), "20.5px Arial");
    }
}
