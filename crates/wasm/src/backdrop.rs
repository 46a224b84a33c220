//! Wires a [`SimulationState`] to a page canvas.
//!
//! The frame closure re-registers itself with `requestAnimationFrame` before
//! drawing, so the loop runs until the [`LoopHandle`] is cancelled through
//! [`BackdropHandle::stop`]. Pointer moves reach the driver immediately;
//! resizes resize the canvas immediately and reseed the field at the start
//! of the next frame.

use std::cell::RefCell;
use std::rc::Rc;

use neural_backdrop_core::{
    AnimationDriver, BackdropConfig, LoopHandle, SimulationState, Xorshift64,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};

use crate::canvas::CanvasSurface;
use crate::{js_error, window};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// An event listener registered on the window, removed on stop.
struct Listener {
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Controls one running backdrop.
#[wasm_bindgen]
pub struct BackdropHandle {
    window: Window,
    driver: Rc<RefCell<AnimationDriver>>,
    loop_handle: LoopHandle,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Stops the animation loop and detaches the pointer and resize listeners.
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        if !self.loop_handle.is_cancelled() {
            log::info!("stopping backdrop after {} frames", self.driver.borrow().frames());
        }
        self.loop_handle.cancel();
        for listener in self.listeners.drain(..) {
            if let Err(e) = self.window.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            ) {
                log::debug!("removing {} listener failed: {e:?}", listener.event);
            }
        }
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.driver.borrow().state().field().len()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        !self.loop_handle.is_cancelled()
    }
}

impl Drop for BackdropHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Starts the backdrop on the canvas with id `canvas_id`, sized to the viewport.
///
/// `config_json` optionally overrides the default constants. Returns
/// `undefined` without starting anything when no such canvas exists.
#[wasm_bindgen(js_name = startBackdrop)]
pub fn start_backdrop(
    canvas_id: &str,
    config_json: Option<String>,
) -> Result<Option<BackdropHandle>, JsValue> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| js_error("window has no document"))?;
    let Some(element) = document.get_element_by_id(canvas_id) else {
        log::warn!("no element #{canvas_id}; backdrop not started");
        return Ok(None);
    };
    let canvas: HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| js_error(format!("#{canvas_id} is not a canvas")))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| js_error("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| js_error("unexpected 2d context type"))?;

    let config = match config_json {
        Some(text) => {
            let params: serde_json::Value = serde_json::from_str(&text).map_err(js_error)?;
            BackdropConfig::from_json(&params).map_err(js_error)?
        }
        None => BackdropConfig::default(),
    };

    let (width, height) = fit_to_viewport(&window, &canvas);
    let seed = Xorshift64::from_unit(js_sys::Math::random()).next_u64();
    let state = SimulationState::new(config, width, height, seed).map_err(js_error)?;
    let driver = Rc::new(RefCell::new(AnimationDriver::new(state)));
    let loop_handle = driver.borrow_mut().start();

    let listeners = vec![
        listen(&window, "mousemove", pointer_listener(driver.clone()))?,
        listen(
            &window,
            "resize",
            resize_listener(window.clone(), canvas, driver.clone()),
        )?,
    ];

    schedule_frames(
        &window,
        driver.clone(),
        CanvasSurface::new(ctx),
        loop_handle.clone(),
    )?;

    Ok(Some(BackdropHandle {
        window,
        driver,
        loop_handle,
        listeners,
    }))
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (read(window.inner_width()), read(window.inner_height()))
}

/// Sets the canvas pixel size to the viewport and returns it.
fn fit_to_viewport(window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let (width, height) = viewport_size(window);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    (width, height)
}

fn listen(
    window: &Window,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
) -> Result<Listener, JsValue> {
    window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    Ok(Listener { event, callback })
}

fn pointer_listener(driver: Rc<RefCell<AnimationDriver>>) -> Closure<dyn FnMut(Event)> {
    Closure::new(move |event: Event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            driver
                .borrow_mut()
                .pointer_moved(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        }
    })
}

fn resize_listener(
    window: Window,
    canvas: HtmlCanvasElement,
    driver: Rc<RefCell<AnimationDriver>>,
) -> Closure<dyn FnMut(Event)> {
    Closure::new(move |_event: Event| {
        let (width, height) = fit_to_viewport(&window, &canvas);
        if let Err(e) = driver.borrow_mut().queue_resize(width, height) {
            log::warn!("ignoring resize: {e}");
        }
    })
}

fn schedule_frames(
    window: &Window,
    driver: Rc<RefCell<AnimationDriver>>,
    mut surface: CanvasSurface,
    handle: LoopHandle,
) -> Result<(), JsValue> {
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let win = window.clone();

    *slot.borrow_mut() = Some(Closure::new(move || {
        if handle.is_cancelled() {
            // Drops this closure and breaks the slot <-> closure cycle.
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
        driver.borrow_mut().frame(&mut surface);
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
