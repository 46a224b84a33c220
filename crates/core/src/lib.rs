#![deny(unsafe_code)]
//! Core of the neural-backdrop page effect.
//!
//! A field of drifting teal nodes, pushed away by the pointer and joined by
//! fading lines when close. Everything is owned by a [`SimulationState`] and
//! drawn through the [`Surface`] trait; [`AnimationDriver`] wraps it in a
//! cancellable per-frame loop. The [`page`] module holds the smaller header
//! and scroll behaviors.

pub mod color;
pub mod config;
pub mod connect;
pub mod driver;
pub mod error;
pub mod field;
pub mod page;
pub mod particle;
pub mod pointer;
pub mod prng;
pub mod state;
pub mod surface;

pub use color::{Rgb, Rgba};
pub use config::BackdropConfig;
pub use connect::{Link, LinkKind};
pub use driver::{AnimationDriver, DriverPhase, FrameStatus, LoopHandle};
pub use error::BackdropError;
pub use field::ParticleField;
pub use particle::Particle;
pub use pointer::PointerTracker;
pub use prng::Xorshift64;
pub use state::SimulationState;
pub use surface::{Bounds, DrawCommand, DrawList, Surface};
