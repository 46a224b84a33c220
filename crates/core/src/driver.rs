//! The per-frame loop around a [`SimulationState`].
//!
//! The driver does not own a clock. A host (the browser's
//! `requestAnimationFrame`, the CLI's frame counter, a test) calls
//! [`AnimationDriver::frame`] and reschedules while it returns
//! [`FrameStatus::Continue`].
//!
//! ```text
//! Idle --start()--> Running
//! ```
//!
//! There is no way back to `Idle`. Stopping is done through the
//! [`LoopHandle`] returned by `start`: once cancelled, every later `frame`
//! call returns [`FrameStatus::Halted`] without drawing.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::BackdropError;
use crate::state::SimulationState;
use crate::surface::{Bounds, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Running,
}

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule another frame.
    Continue,
    /// Stop scheduling; the loop was never started or has been cancelled.
    Halted,
}

/// Cancellation token for a running loop. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl LoopHandle {
    /// Stops the loop; the next `frame` call returns [`FrameStatus::Halted`].
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether any clone of this handle has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

pub struct AnimationDriver {
    state: SimulationState,
    phase: DriverPhase,
    handle: LoopHandle,
    pending_resize: Option<Bounds>,
    frames: u64,
}

impl AnimationDriver {
    /// Wraps `state` in an `Idle` driver; nothing is drawn until [`start`](Self::start).
    pub fn new(state: SimulationState) -> Self {
        Self {
            state,
            phase: DriverPhase::Idle,
            handle: LoopHandle::default(),
            pending_resize: None,
            frames: 0,
        }
    }

    /// Moves to `Running` and returns the loop handle. Calling it again
    /// returns the same handle.
    pub fn start(&mut self) -> LoopHandle {
        if self.phase == DriverPhase::Idle {
            self.phase = DriverPhase::Running;
            log::info!(
                "animation started with {} particles on {}x{}",
                self.state.field().len(),
                self.state.bounds().width(),
                self.state.bounds().height()
            );
        }
        self.handle.clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// The simulation being driven.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Records the pointer immediately; the next frame sees it.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.state.pointer_moved(x, y);
    }

    /// Queues a resize for the start of the next frame. Only the latest
    /// queued size is applied.
    pub fn queue_resize(&mut self, width: f64, height: f64) -> Result<(), BackdropError> {
        self.pending_resize = Some(Bounds::new(width, height)?);
        Ok(())
    }

    /// Runs one cycle: apply any queued resize, clear, update and draw every
    /// particle, then draw links.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStatus {
        if self.phase == DriverPhase::Idle {
            return FrameStatus::Halted;
        }
        if self.handle.is_cancelled() {
            return FrameStatus::Halted;
        }

        if let Some(bounds) = self.pending_resize.take() {
            // Already validated by queue_resize.
            if let Err(e) = self.state.resize(bounds.width(), bounds.height()) {
                log::warn!("dropping queued resize: {e}");
            }
        }

        self.state.frame(surface);
        self.frames += 1;
        FrameStatus::Continue
    }
}
