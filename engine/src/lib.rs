pub mod types;
pub mod error;
pub mod random;
pub mod config;
pub mod surface;
pub mod animation;
pub mod backdrop;
pub mod orbs;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod host;

pub use animation::{Animation, FrameScheduler, Layer};
pub use backdrop::Backdrop;
pub use config::BackdropConfig;
pub use error::BackdropError;
pub use orbs::{OrbConfig, OrbField};
pub use random::{Lcg, RandomSource};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use host::{AmbientBackground, GradientBackground};
