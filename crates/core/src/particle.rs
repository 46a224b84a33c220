//! A single drifting node.
//!
//! [`Particle`] is a small `Copy` value. [`Particle::update`] is a pure
//! transition that returns the next state instead of mutating in place, so a
//! frame is just `particles.iter_mut().for_each(|p| *p = p.update(..))`.

use glam::DVec2;
use serde::Serialize;

use crate::config::BackdropConfig;
use crate::pointer::PointerTracker;
use crate::prng::Xorshift64;
use crate::surface::{Bounds, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    position: DVec2,
    velocity: DVec2,
    radius: f64,
}

impl Particle {
    /// Creates a particle from explicit values.
    pub fn new(position: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Spawns a particle uniformly inside `bounds` with a random radius in
    /// `[min_radius, max_radius)` and a random drift of up to `max_speed` per axis.
    ///
    /// Draw order is x, y, radius, vx, vy.
    pub fn spawn(rng: &mut Xorshift64, bounds: Bounds, config: &BackdropConfig) -> Self {
        let x = rng.next_range(0.0, bounds.width());
        let y = rng.next_range(0.0, bounds.height());
        let radius = rng.next_range(config.min_radius, config.max_radius);
        let vx = rng.next_signed(config.max_speed);
        let vy = rng.next_signed(config.max_speed);
        Self::new(DVec2::new(x, y), DVec2::new(vx, vy), radius)
    }

    /// Center in surface pixels.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Displacement per frame.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Drawn radius in pixels.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Advances one frame.
    ///
    /// The particle moves by its velocity. Each axis whose new coordinate lies
    /// outside `[0, extent]` has its velocity negated; the position itself is
    /// not pulled back, so a particle may sit one frame outside the surface.
    /// Then, if the pointer is set and strictly within the interaction radius,
    /// the position is nudged directly away from it.
    #[must_use]
    pub fn update(self, pointer: &PointerTracker, bounds: Bounds, config: &BackdropConfig) -> Self {
        let mut position = self.position + self.velocity;
        let mut velocity = self.velocity;

        if position.x > bounds.width() || position.x < 0.0 {
            velocity.x = -velocity.x;
        }
        if position.y > bounds.height() || position.y < 0.0 {
            velocity.y = -velocity.y;
        }

        if let Some(target) = pointer.current() {
            position += repulsion(
                position,
                target,
                pointer.interaction_radius(),
                config.push_strength,
            );
        }

        Self {
            position,
            velocity,
            radius: self.radius,
        }
    }

    /// Fills the node as a circle of its radius in the configured node color.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &BackdropConfig) {
        surface.fill_circle(
            self.position,
            self.radius,
            config.node_color.with_alpha(config.node_alpha),
        );
    }
}

/// Displacement pushing `position` away from `pointer`.
///
/// `force = (radius - d) / radius` for `0 < d < radius`, scaled by `strength`
/// along the unit vector from the pointer to the particle. Zero outside the
/// radius and when the particle sits exactly on the pointer.
pub fn repulsion(position: DVec2, pointer: DVec2, radius: f64, strength: f64) -> DVec2 {
    let away = position - pointer;
    let distance = away.length();
    if distance >= radius || distance == 0.0 {
        return DVec2::ZERO;
    }
    let force = (radius - distance) / radius;
    away / distance * force * strength
}
