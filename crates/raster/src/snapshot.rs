//! PNG output of a [`PixelSurface`].
//!
//! Feature-gated behind `png` (default on) so the browser build never pulls
//! in the `image` crate.

use std::path::Path;

use neural_backdrop_core::error::BackdropError;
use neural_backdrop_core::Rgb;

use crate::pixel::PixelSurface;

/// Writes the surface as a PNG.
///
/// With a `background` the image is opaque; without one transparent pixels
/// are kept. Returns `BackdropError::InvalidDimensions` if a side overflows
/// `u32`, or `BackdropError::Io` on encode or write failure.
pub fn write_png(
    surface: &PixelSurface,
    background: Option<Rgb>,
    path: &Path,
) -> Result<(), BackdropError> {
    let invalid = || BackdropError::InvalidDimensions {
        width: surface.width() as f64,
        height: surface.height() as f64,
    };
    let w = u32::try_from(surface.width()).map_err(|_| invalid())?;
    let h = u32::try_from(surface.height()).map_err(|_| invalid())?;
    let bytes = match background {
        Some(bg) => surface.composite_over(bg),
        None => surface.to_rgba8(),
    };
    let img = image::RgbaImage::from_raw(w, h, bytes)
        .ok_or_else(|| BackdropError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| BackdropError::Io(e.to_string()))?;
    log::debug!("wrote {w}x{h} snapshot to {}", path.display());
    Ok(())
}
