//! Seedable Xorshift64 generator used for particle spawning.
//!
//! Every random draw in the simulation goes through this type, so a given
//! seed and viewport always produce the same field. The browser host seeds it
//! from `Math.random()`; the CLI and the tests seed it explicitly.

/// Xorshift64 PRNG with shifts (13, 7, 17).
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Replacement for a zero seed, which is a fixed point of xorshift.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Seeds from a float in [0, 1), such as the output of `Math.random()`.
    pub fn from_unit(sample: f64) -> Self {
        let sample = if sample.is_finite() {
            sample.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self::new((sample * u64::MAX as f64) as u64)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform f64 in [-magnitude, magnitude), i.e. `(rand * 2 - 1) * magnitude`.
    pub fn next_signed(&mut self, magnitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * magnitude
    }
}
