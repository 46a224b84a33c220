//! Error types for the neural-backdrop core.

use thiserror::Error;

/// Errors produced when building or resizing a simulation.
///
/// Stepping and rendering are infallible; only construction-time inputs
/// (dimensions, configuration, colors) and snapshot output can fail.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// Width or height was negative, NaN, or infinite.
    #[error("invalid dimensions {width}x{height}: width and height must be finite and non-negative")]
    InvalidDimensions { width: f64, height: f64 },

    /// A configuration value failed validation.
    #[error("invalid config value for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// An I/O failure while writing a snapshot or reading a config file.
    #[error("i/o error: {0}")]
    Io(String),
}

impl BackdropError {
    /// Shorthand for [`BackdropError::InvalidConfig`].
    pub fn config(field: &str, reason: impl Into<String>) -> Self {
        BackdropError::InvalidConfig {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}
