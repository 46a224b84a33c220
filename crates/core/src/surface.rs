//! The drawing surface seam between the simulation and its host.
//!
//! The simulation only ever clears, fills circles, and strokes straight
//! lines. Hosts implement [`Surface`] over whatever they have: the browser
//! crate wraps a `CanvasRenderingContext2d`, the raster crate writes into an
//! RGBA buffer, and [`DrawList`] records the calls for inspection.

use glam::DVec2;
use serde::Serialize;

use crate::color::Rgba;
use crate::error::BackdropError;

/// Pixel extent of the surface the particles live on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Returns `BackdropError::InvalidDimensions` for negative or non-finite sizes.
    /// Zero is allowed: a collapsed viewport simply holds no particles.
    pub fn new(width: f64, height: f64) -> Result<Self, BackdropError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(BackdropError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// `width * height`, the input to the particle count.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Minimal 2D drawing interface.
pub trait Surface {
    /// Resets the rectangle to fully transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fills a circle with no stroke.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Strokes a single straight segment.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);
}

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Rgba,
    },
}

/// A [`Surface`] that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// An empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the list empty.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Only the recorded circle fills.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Only the recorded line strokes.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for DrawList {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
