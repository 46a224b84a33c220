#![deny(unsafe_code)]
//! Headless rendering for the neural-backdrop.
//!
//! [`PixelSurface`] implements the core `Surface` trait over an RGBA buffer so
//! the CLI and tests can run the exact frame loop the browser runs. With the
//! `png` feature, [`snapshot::write_png`] saves a surface to disk.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::PixelSurface;

use neural_backdrop_core::{AnimationDriver, FrameStatus};

/// Runs up to `frames` driver cycles into `surface`, stopping early if the
/// driver halts. Returns the number of frames actually drawn.
pub fn run_frames(driver: &mut AnimationDriver, surface: &mut PixelSurface, frames: usize) -> usize {
    let mut drawn = 0;
    for _ in 0..frames {
        if driver.frame(surface) == FrameStatus::Halted {
            log::debug!("driver halted after {drawn} of {frames} frames");
            break;
        }
        drawn += 1;
    }
    log::trace!("ran {drawn} frames, {} total", driver.frames());
    drawn
}
