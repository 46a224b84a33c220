//! Options for the one-shot scroll reveal.
//!
//! An element is revealed the first time at least `threshold` of it is
//! visible inside the viewport shrunk by `bottom_inset` pixels at the bottom.
//! The host marks it `active` and stops watching it.

use crate::error::BackdropError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Visible fraction of the element, in [0, 1], that triggers the reveal.
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport before intersecting.
    pub bottom_inset: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_inset: 50.0,
        }
    }
}

impl RevealOptions {
    /// Rejects a threshold outside [0, 1] or a non-finite inset.
    pub fn validate(&self) -> Result<(), BackdropError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(BackdropError::config("threshold", "must be in [0, 1]"));
        }
        if !self.bottom_inset.is_finite() {
            return Err(BackdropError::config("bottom_inset", "must be finite"));
        }
        Ok(())
    }

    /// CSS margin string for an intersection observer root,
    /// e.g. `"0px 0px -50px 0px"`.
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", 0.0 - self.bottom_inset)
    }
}
