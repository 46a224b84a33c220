//! Page behaviors outside the particle backdrop.
//!
//! Pure state only; the browser crate owns the DOM and the timers.

pub mod reveal;
pub mod scroll;
pub mod typewriter;

pub use reveal::RevealOptions;
pub use scroll::{active_section, link_is_active, scroll_progress, Section};
pub use typewriter::{Typewriter, TypewriterFrame, TypewriterTiming};
