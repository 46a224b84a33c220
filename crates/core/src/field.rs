//! The particle population, sized from the surface area.

use crate::config::BackdropConfig;
use crate::particle::Particle;
use crate::prng::Xorshift64;
use crate::surface::Bounds;

/// Ordered collection of every live particle.
///
/// The field is only ever replaced wholesale: [`reseed`](Self::reseed)
/// discards all existing particles and spawns a fresh set.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// An empty field; call [`reseed`](Self::reseed) to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole population with `config.particle_count(width, height)`
    /// freshly spawned particles.
    pub fn reseed(&mut self, bounds: Bounds, config: &BackdropConfig, rng: &mut Xorshift64) {
        let count = config.particle_count(bounds.width(), bounds.height());
        self.particles = (0..count)
            .map(|_| Particle::spawn(rng, bounds, config))
            .collect();
        log::debug!(
            "reseeded particle field: {count} particles for {}x{}",
            bounds.width(),
            bounds.height()
        );
    }

    /// Every particle, in spawn order.
    pub fn all(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn all_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl FromIterator<Particle> for ParticleField {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        Self {
            particles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(width: f64, height: f64, seed: u64) -> ParticleField {
        let mut field = ParticleField::new();
        let mut rng = Xorshift64::new(seed);
        field.reseed(
            Bounds::new(width, height).unwrap(),
            &BackdropConfig::default(),
            &mut rng,
        );
        field
    }

    #[test]
    fn new_field_is_empty() {
        assert!(ParticleField::new().is_empty());
    }

    #[test]
    fn reseed_800_by_600_spawns_96() {
        assert_eq!(seeded(800.0, 600.0, 1).len(), 96);
    }

    #[test]
    fn reseed_replaces_everything() {
        let config = BackdropConfig::default();
        let mut rng = Xorshift64::new(5);
        let mut field = ParticleField::new();
        field.reseed(Bounds::new(800.0, 600.0).unwrap(), &config, &mut rng);
        let before: Vec<Particle> = field.all().to_vec();

        field.reseed(Bounds::new(400.0, 300.0).unwrap(), &config, &mut rng);
        assert_eq!(field.len(), 24);
        assert!(field
            .all()
            .iter()
            .all(|p| p.position().x < 400.0 && p.position().y < 300.0));
        assert!(field.all().iter().all(|p| !before.contains(p)));
    }

    #[test]
    fn zero_area_yields_empty_field() {
        assert!(seeded(0.0, 600.0, 3).is_empty());
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(seeded(640.0, 480.0, 77).all(), seeded(640.0, 480.0, 77).all());
    }

    #[test]
    fn different_seed_different_field() {
        assert_ne!(seeded(640.0, 480.0, 1).all(), seeded(640.0, 480.0, 2).all());
    }

    #[test]
    fn collects_from_iterator() {
        use glam::DVec2;
        let field: ParticleField = (0..3)
            .map(|i| Particle::new(DVec2::splat(i as f64), DVec2::ZERO, 1.0))
            .collect();
        assert_eq!(field.len(), 3);
        assert_eq!(field.all()[2].position(), DVec2::splat(2.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn length_tracks_latest_reseed(
                w1 in 0_u32..1500,
                h1 in 0_u32..1500,
                w2 in 0_u32..1500,
                h2 in 0_u32..1500,
                seed: u64,
            ) {
                let config = BackdropConfig::default();
                let mut rng = Xorshift64::new(seed);
                let mut field = ParticleField::new();
                field.reseed(Bounds::new(w1 as f64, h1 as f64).unwrap(), &config, &mut rng);
                field.reseed(Bounds::new(w2 as f64, h2 as f64).unwrap(), &config, &mut rng);
                prop_assert_eq!(field.len() as u64, (w2 as u64 * h2 as u64) / 5000);
            }
        }
    }
}
