use thiserror::Error as ThisError;

#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum BackdropError {
    #[error("{field}: range [{min}, {max}) is empty or not finite")]
    InvalidSpan { field: &'static str, min: f64, max: f64 },

    #[error("{field}: expected a finite non-negative value, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("{field}: opacity {value} is outside [0, 1]")]
    InvalidOpacity { field: &'static str, value: f64 },

    #[error("glyph palette is empty but {0} icons were requested")]
    EmptyGlyphs(usize),

    #[error("orb {index}: {reason}")]
    InvalidOrb { index: usize, reason: &'static str },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl From<serde_json::Error> for BackdropError {
    fn from(err: serde_json::Error) -> Self {
        BackdropError::InvalidOptions(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<BackdropError> for wasm_bindgen::JsValue {
    fn from(err: BackdropError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Checks a magnitude (speed, blur, distance...) is finite and not negative.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), BackdropError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BackdropError::NegativeValue { field, value })
    }
}

pub(crate) fn opacity(field: &'static str, value: f64) -> Result<(), BackdropError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(BackdropError::InvalidOpacity { field, value })
    }
}
