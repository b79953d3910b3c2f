/// Source of uniform samples in `[0, 1)` used to seed entity populations.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}

const MULTIPLIER: f64 = 1103515245.0;
const INCREMENT: f64 = 12345.0;
const MODULUS: f64 = 2147483648.0;

/// Linear congruential generator. The same seed always yields the same
/// sequence, on every target.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: f64,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Lcg { state: seed as f64 % MODULUS }
    }
}

impl RandomSource for Lcg {
    fn next_unit(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state / MODULUS
    }
}

/// The browser's `Math.random()`.
#[cfg(target_arch = "wasm32")]
pub struct MathRandom;

#[cfg(target_arch = "wasm32")]
impl RandomSource for MathRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}
