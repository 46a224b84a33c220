//! Proximity links between nodes and from nodes to the pointer.
//!
//! For every `a`, the scan visits `b` in `a..n` (or `a + 1..n` when
//! `self_links` is off) and emits a node link when the pair is closer than
//! `link_distance`. After the inner loop for `a` it emits the pointer link for
//! `a`, if any. Consumers see links in exactly that interleaved order.
//!
//! Opacity falls off linearly: `(1 - d / threshold) * scale`.

use glam::DVec2;

use crate::color::Rgba;
use crate::config::BackdropConfig;
use crate::particle::Particle;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Between two particles.
    Node,
    /// From a particle to the pointer.
    Pointer,
}

/// One line to stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub kind: LinkKind,
    pub from: DVec2,
    pub to: DVec2,
    pub width: f64,
    pub color: Rgba,
}

/// Opacity of a link of length `distance`, or `None` at or beyond `threshold`.
pub fn link_alpha(distance: f64, threshold: f64, scale: f64) -> Option<f64> {
    if distance < threshold {
        Some((1.0 - distance / threshold) * scale)
    } else {
        None
    }
}

/// Calls `emit` for every link in scan order without allocating.
pub fn for_each_link<F>(
    particles: &[Particle],
    pointer: Option<DVec2>,
    config: &BackdropConfig,
    mut emit: F,
) where
    F: FnMut(Link),
{
    let first_partner = usize::from(!config.self_links);

    for (a, pa) in particles.iter().enumerate() {
        let from = pa.position();

        for pb in particles.iter().skip(a + first_partner) {
            let to = pb.position();
            if let Some(alpha) = link_alpha(
                from.distance(to),
                config.link_distance,
                config.link_alpha,
            ) {
                emit(Link {
                    kind: LinkKind::Node,
                    from,
                    to,
                    width: config.link_width,
                    color: config.link_color.with_alpha(alpha),
                });
            }
        }

        if let Some(target) = pointer {
            if let Some(alpha) = link_alpha(
                from.distance(target),
                config.pointer_link_distance,
                config.pointer_link_alpha,
            ) {
                emit(Link {
                    kind: LinkKind::Pointer,
                    from,
                    to: target,
                    width: config.pointer_link_width,
                    color: config.link_color.with_alpha(alpha),
                });
            }
        }
    }
}

/// Collects every link in scan order.
pub fn links(particles: &[Particle], pointer: Option<DVec2>, config: &BackdropConfig) -> Vec<Link> {
    let mut out = Vec::new();
    for_each_link(particles, pointer, config, |link| out.push(link));
    out
}

/// Strokes every link onto `surface`.
pub fn draw_links<S: Surface + ?Sized>(
    particles: &[Particle],
    pointer: Option<DVec2>,
    config: &BackdropConfig,
    surface: &mut S,
) {
    for_each_link(particles, pointer, config, |link| {
        surface.stroke_line(link.from, link.to, link.width, link.color);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn node(x: f64, y: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::ZERO, 1.0)
    }

    fn no_self_links() -> BackdropConfig {
        BackdropConfig {
            self_links: false,
            ..BackdropConfig::default()
        }
    }

    #[test]
    fn alpha_at_distance_100() {
        let alpha = link_alpha(100.0, 150.0, 0.2).unwrap();
        assert!((alpha - 0.2 / 3.0).abs() < 1e-12, "got {alpha}");
        assert!((alpha - 0.0667).abs() < 1e-4);
    }

    #[test]
    fn threshold_is_strict() {
        assert!(link_alpha(150.0, 150.0, 0.2).is_none());
        assert!(link_alpha(149.999, 150.0, 0.2).is_some());
        assert!(link_alpha(250.0, 250.0, 0.8).is_none());
    }

    #[test]
    fn zero_distance_has_full_scale() {
        assert_eq!(link_alpha(0.0, 150.0, 0.2), Some(0.2));
        assert_eq!(link_alpha(0.0, 250.0, 0.8), Some(0.8));
    }

    #[test]
    fn two_nodes_at_100_link_once_without_self_pairs() {
        let particles = [node(0.0, 0.0), node(100.0, 0.0)];
        let found = links(&particles, None, &no_self_links());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, LinkKind::Node);
        assert_eq!(found[0].width, 1.5);
        assert_eq!(found[0].color.rgb, Rgb::TEAL);
        assert!((found[0].color.alpha - 0.2 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn self_pairs_emit_zero_length_links_by_default() {
        let particles = [node(0.0, 0.0), node(1000.0, 0.0)];
        let found = links(&particles, None, &BackdropConfig::default());
        assert_eq!(found.len(), 2);
        for link in &found {
            assert_eq!(link.from, link.to);
            assert_eq!(link.color.alpha, 0.2);
        }
    }

    #[test]
    fn far_nodes_do_not_link() {
        let particles = [node(0.0, 0.0), node(150.0, 0.0)];
        assert!(links(&particles, None, &no_self_links()).is_empty());
    }

    #[test]
    fn pointer_link_uses_its_own_constants() {
        let particles = [node(0.0, 0.0)];
        let found = links(&particles, Some(DVec2::new(200.0, 0.0)), &no_self_links());
        assert_eq!(found.len(), 1);
        let link = found[0];
        assert_eq!(link.kind, LinkKind::Pointer);
        assert_eq!(link.width, 1.0);
        assert_eq!(link.to, DVec2::new(200.0, 0.0));
        // (1 - 200/250) * 0.8; a node link would not exist at 200 at all.
        assert!((link.color.alpha - 0.16).abs() < 1e-12);
    }

    #[test]
    fn pointer_beyond_250_is_ignored() {
        let particles = [node(0.0, 0.0)];
        assert!(links(&particles, Some(DVec2::new(250.0, 0.0)), &no_self_links()).is_empty());
    }

    #[test]
    fn scan_order_interleaves_pointer_links() {
        let particles = [node(0.0, 0.0), node(10.0, 0.0), node(20.0, 0.0)];
        let kinds: Vec<LinkKind> = links(&particles, Some(DVec2::new(5.0, 5.0)), &no_self_links())
            .iter()
            .map(|l| l.kind)
            .collect();
        use LinkKind::{Node, Pointer};
        assert_eq!(kinds, vec![Node, Node, Pointer, Node, Pointer, Pointer]);
    }

    #[test]
    fn pair_count_is_triangular() {
        let particles: Vec<Particle> = (0..10).map(|i| node(i as f64, 0.0)).collect();
        assert_eq!(links(&particles, None, &no_self_links()).len(), 45);
        assert_eq!(links(&particles, None, &BackdropConfig::default()).len(), 55);
    }

    #[test]
    fn draw_links_strokes_every_link() {
        use crate::surface::{DrawCommand, DrawList};
        let particles = [node(0.0, 0.0), node(30.0, 40.0)];
        let mut list = DrawList::new();
        draw_links(&particles, Some(DVec2::new(0.0, 10.0)), &no_self_links(), &mut list);
        let expected = links(&particles, Some(DVec2::new(0.0, 10.0)), &no_self_links());
        assert_eq!(list.len(), expected.len());
        for (cmd, link) in list.commands().iter().zip(&expected) {
            assert_eq!(
                cmd,
                &DrawCommand::Line {
                    from: link.from,
                    to: link.to,
                    width: link.width,
                    color: link.color,
                }
            );
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn alpha_decreases_with_distance(d1 in 0.0_f64..150.0, d2 in 0.0_f64..150.0) {
                prop_assume!(d2 - d1 > 1e-9);
                let a1 = link_alpha(d1, 150.0, 0.2).unwrap();
                let a2 = link_alpha(d2, 150.0, 0.2).unwrap();
                prop_assert!(a1 > a2, "alpha({d1}) = {a1} <= alpha({d2}) = {a2}");
            }

            #[test]
            fn alpha_stays_within_scale(d in 0.0_f64..400.0) {
                if let Some(a) = link_alpha(d, 250.0, 0.8) {
                    prop_assert!((0.0..=0.8).contains(&a));
                }
            }
        }
    }
}
