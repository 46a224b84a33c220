//! Last known pointer position.

use glam::DVec2;

/// Stores the most recent pointer coordinates and the repulsion radius.
///
/// The position starts unset and, once set, is only ever overwritten: a
/// pointer leaving the surface keeps its last coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    position: Option<DVec2>,
    interaction_radius: f64,
}

impl PointerTracker {
    /// Creates a tracker with no position yet.
    pub fn new(interaction_radius: f64) -> Self {
        Self {
            position: None,
            interaction_radius,
        }
    }

    /// Records a pointer-move event in surface coordinates.
    pub fn on_move(&mut self, x: f64, y: f64) {
        self.position = Some(DVec2::new(x, y));
    }

    /// Last recorded position, or `None` before the first move.
    pub fn current(&self) -> Option<DVec2> {
        self.position
    }

    /// Distance within which particles are pushed away.
    pub fn interaction_radius(&self) -> f64 {
        self.interaction_radius
    }
}
