//! The whole simulation as one owned value.

use glam::DVec2;
use serde::Serialize;
use serde_json::Value;

use crate::config::BackdropConfig;
use crate::connect;
use crate::error::BackdropError;
use crate::field::ParticleField;
use crate::particle::Particle;
use crate::pointer::PointerTracker;
use crate::prng::Xorshift64;
use crate::surface::{Bounds, Surface};

/// Serialized view of the moving parts of a [`SimulationState`].
#[derive(Serialize)]
struct Snapshot<'a> {
    bounds: Bounds,
    pointer: Option<DVec2>,
    particles: &'a [Particle],
}

/// Bounds, pointer, particles, config, and RNG for one surface.
///
/// Nothing here is global, so any number of surfaces can run side by side.
#[derive(Debug, Clone)]
pub struct SimulationState {
    config: BackdropConfig,
    bounds: Bounds,
    pointer: PointerTracker,
    field: ParticleField,
    rng: Xorshift64,
}

impl SimulationState {
    /// Validates `config` and seeds the field for a `width` x `height` surface.
    pub fn new(
        config: BackdropConfig,
        width: f64,
        height: f64,
        seed: u64,
    ) -> Result<Self, BackdropError> {
        config.validate()?;
        let bounds = Bounds::new(width, height)?;
        let mut rng = Xorshift64::new(seed);
        let mut field = ParticleField::new();
        field.reseed(bounds, &config, &mut rng);
        Ok(Self {
            pointer: PointerTracker::new(config.interaction_radius),
            config,
            bounds,
            field,
            rng,
        })
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Bounds, pointer and every particle as a JSON object.
    pub fn snapshot_json(&self) -> Value {
        let snapshot = Snapshot {
            bounds: self.bounds,
            pointer: self.pointer.current(),
            particles: self.field.all(),
        };
        serde_json::to_value(snapshot).unwrap_or(Value::Null)
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.on_move(x, y);
    }

    /// Adopts new surface dimensions and reseeds the whole field.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), BackdropError> {
        self.bounds = Bounds::new(width, height)?;
        self.field.reseed(self.bounds, &self.config, &mut self.rng);
        Ok(())
    }

    /// Advances every particle one frame without drawing.
    pub fn step(&mut self) {
        let (pointer, bounds, config) = (&self.pointer, self.bounds, &self.config);
        for particle in self.field.all_mut() {
            *particle = particle.update(pointer, bounds, config);
        }
    }

    /// Draws the current state: every node, then every link on top.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in self.field.all() {
            particle.draw(surface, &self.config);
        }
        self.draw_links(surface);
    }

    /// One full frame: clear, update and draw each particle, then links.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear_rect(0.0, 0.0, self.bounds.width(), self.bounds.height());
        let (pointer, bounds, config) = (&self.pointer, self.bounds, &self.config);
        for particle in self.field.all_mut() {
            *particle = particle.update(pointer, bounds, config);
            particle.draw(surface, config);
        }
        self.draw_links(surface);
    }

    fn draw_links<S: Surface + ?Sized>(&self, surface: &mut S) {
        connect::draw_links(
            self.field.all(),
            self.pointer.current(),
            &self.config,
            surface,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};

    fn state(width: f64, height: f64) -> SimulationState {
        SimulationState::new(BackdropConfig::default(), width, height, 42).unwrap()
    }

    #[test]
    fn new_seeds_field_from_area() {
        assert_eq!(state(800.0, 600.0).field().len(), 96);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = BackdropConfig {
            link_distance: -1.0,
            ..BackdropConfig::default()
        };
        assert!(SimulationState::new(config, 800.0, 600.0, 1).is_err());
    }

    #[test]
    fn new_rejects_negative_dimensions() {
        assert!(SimulationState::new(BackdropConfig::default(), -1.0, 600.0, 1).is_err());
    }

    #[test]
    fn resize_reseeds_with_new_count() {
        let mut s = state(800.0, 600.0);
        s.resize(400.0, 300.0).unwrap();
        assert_eq!(s.field().len(), 24);
        assert_eq!(s.bounds(), Bounds::new(400.0, 300.0).unwrap());
    }

    #[test]
    fn failed_resize_keeps_previous_state() {
        let mut s = state(800.0, 600.0);
        let before = s.field().all().to_vec();
        assert!(s.resize(f64::NAN, 300.0).is_err());
        assert_eq!(s.field().all(), before.as_slice());
    }

    #[test]
    fn pointer_moves_are_visible_to_next_step() {
        let mut s = state(800.0, 600.0);
        assert!(s.pointer().current().is_none());
        s.pointer_moved(10.0, 20.0);
        assert_eq!(s.pointer().current(), Some(glam::DVec2::new(10.0, 20.0)));
    }

    #[test]
    fn step_without_pointer_moves_each_particle_by_velocity() {
        let mut s = state(800.0, 600.0);
        let before = s.field().all().to_vec();
        s.step();
        for (old, new) in before.iter().zip(s.field().all()) {
            assert_eq!(new.position(), old.position() + old.velocity());
        }
    }

    #[test]
    fn frame_draws_clear_then_circles_then_lines() {
        let mut s = state(800.0, 600.0);
        s.pointer_moved(400.0, 300.0);
        let mut list = DrawList::new();
        s.frame(&mut list);

        let cmds = list.commands();
        assert!(matches!(
            cmds[0],
            DrawCommand::Clear { x, y, width, height } if x == 0.0 && y == 0.0 && width == 800.0 && height == 600.0
        ));
        let circles = &cmds[1..=96];
        assert!(circles.iter().all(|c| matches!(c, DrawCommand::Circle { .. })));
        assert!(cmds[97..].iter().all(|c| matches!(c, DrawCommand::Line { .. })));
        // Self links alone guarantee at least one line per particle.
        assert!(cmds.len() - 97 >= 96);
    }

    #[test]
    fn frame_matches_step_then_render() {
        let mut a = state(640.0, 480.0);
        let mut b = a.clone();
        a.pointer_moved(100.0, 100.0);
        b.pointer_moved(100.0, 100.0);

        let mut framed = DrawList::new();
        a.frame(&mut framed);

        let mut split = DrawList::new();
        b.step();
        split.clear_rect(0.0, 0.0, 640.0, 480.0);
        b.render(&mut split);

        assert_eq!(framed.commands(), split.commands());
    }

    #[test]
    fn snapshot_json_lists_every_particle() {
        let mut s = state(800.0, 600.0);
        s.pointer_moved(400.0, 300.0);
        let json = s.snapshot_json();
        assert_eq!(json["bounds"]["width"], 800.0);
        assert_eq!(json["bounds"]["height"], 600.0);
        assert_eq!(json["pointer"], serde_json::json!([400.0, 300.0]));

        let particles = json["particles"].as_array().unwrap();
        assert_eq!(particles.len(), 96);
        let first = s.field().all()[0];
        assert_eq!(particles[0]["radius"], first.radius());
        assert_eq!(particles[0]["position"][0], first.position().x);
    }

    #[test]
    fn snapshot_json_without_pointer_is_null() {
        assert!(state(100.0, 100.0).snapshot_json()["pointer"].is_null());
    }

    #[test]
    fn independent_states_do_not_share_pointer() {
        let mut a = state(800.0, 600.0);
        let b = state(800.0, 600.0);
        a.pointer_moved(1.0, 1.0);
        assert!(b.pointer().current().is_none());
    }
}
