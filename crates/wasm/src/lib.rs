//! Browser bindings for the neural-backdrop.
//!
//! `startBackdrop` runs the particle field on a full-viewport canvas;
//! `startTypewriter`, `startScrollTracking` and `startReveal` drive the header
//! text, the scroll indicators and the reveal-on-scroll sections.

mod backdrop;
mod canvas;
mod page;

use std::fmt::Display;

use wasm_bindgen::prelude::*;
use web_sys::Window;

pub use backdrop::{start_backdrop, BackdropHandle};
pub use canvas::CanvasSurface;
pub use page::{start_reveal, start_scroll_tracking, start_typewriter};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

pub(crate) fn js_error(message: impl Display) -> JsValue {
    JsError::new(&message.to_string()).into()
}

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_error("no global window"))
}
