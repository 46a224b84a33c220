//! DOM wiring for the header typewriter, the scroll indicators, and the
//! scroll reveals.

use std::cell::RefCell;
use std::rc::Rc;

use neural_backdrop_core::page::{
    active_section, link_is_active, scroll_progress, RevealOptions, Section, Typewriter,
    TypewriterTiming,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, NodeList, Window,
};

use crate::{js_error, window};

type TimerSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Elements of a `NodeList` that cast to `T`.
fn nodes<T: JsCast>(list: &NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| js_error("window has no document"))
}

/// Cycles `words` through the text of the first element matching `selector`.
///
/// Returns `false` without starting when the element is missing or every
/// word is empty. The effect runs for the lifetime of the page.
#[wasm_bindgen(js_name = startTypewriter)]
pub fn start_typewriter(selector: &str, words: Vec<String>) -> Result<bool, JsValue> {
    let window = window()?;
    let Some(target) = document(&window)?.query_selector(selector)? else {
        log::warn!("no element matches {selector}; typewriter not started");
        return Ok(false);
    };
    let Some(mut typewriter) = Typewriter::new(&words, TypewriterTiming::default()) else {
        log::warn!("typewriter has no words to show");
        return Ok(false);
    };

    let slot: TimerSlot = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let win = window.clone();
    *slot.borrow_mut() = Some(Closure::new(move || {
        let frame = typewriter.tick();
        target.set_text_content(Some(&frame.text));
        let delay = i32::try_from(frame.delay.as_millis()).unwrap_or(i32::MAX);
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            ) {
                log::error!("setTimeout failed: {e:?}");
            }
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            0,
        )?;
    }
    Ok(true)
}

/// Keeps the progress bar `#progress_id` and the nav links matching
/// `nav_link_selector` in step with the scroll position.
///
/// A missing progress bar only disables the bar; link highlighting still runs.
#[wasm_bindgen(js_name = startScrollTracking)]
pub fn start_scroll_tracking(progress_id: &str, nav_link_selector: &str) -> Result<(), JsValue> {
    let window = window()?;
    let document = document(&window)?;
    let progress = document
        .get_element_by_id(progress_id)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if progress.is_none() {
        log::warn!("no progress bar #{progress_id}");
    }
    let links: Vec<Element> = nodes(&document.query_selector_all(nav_link_selector)?);
    let sections: Vec<HtmlElement> = nodes(&document.query_selector_all("section")?);

    let win = window.clone();
    let on_scroll = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let scroll_y = win.scroll_y().unwrap_or(0.0);

        if let Some(bar) = &progress {
            let document_height = document
                .body()
                .map_or(0.0, |body| f64::from(body.scroll_height()));
            let viewport_height = win
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let percent = scroll_progress(scroll_y, document_height, viewport_height);
            if let Err(e) = bar.style().set_property("width", &format!("{percent}%")) {
                log::debug!("progress bar update failed: {e:?}");
            }
        }

        let layout: Vec<Section> = sections
            .iter()
            .map(|s| Section::new(s.id(), f64::from(s.offset_top()), f64::from(s.client_height())))
            .collect();
        let active = active_section(&layout, scroll_y);
        for link in &links {
            let href = link.get_attribute("href").unwrap_or_default();
            let on = link_is_active(&href, active);
            if let Err(e) = link.class_list().toggle_with_force("active", on) {
                log::debug!("nav link update failed: {e:?}");
            }
        }
    });

    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    // Page-lifetime listener.
    on_scroll.forget();
    Ok(())
}

/// Adds the `active` class to each element matching `selector` the first time
/// it scrolls into view, then stops observing it.
///
/// Returns the number of elements being watched.
#[wasm_bindgen(js_name = startReveal)]
pub fn start_reveal(selector: &str) -> Result<u32, JsValue> {
    let options = RevealOptions::default();
    options.validate().map_err(js_error)?;
    let document = document(&window()?)?;
    let targets: Vec<Element> = nodes(&document.query_selector_all(selector)?);
    if targets.is_empty() {
        log::debug!("no elements match {selector}; nothing to reveal");
        return Ok(0);
    }

    let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Err(e) = target.class_list().add_1("active") {
                    log::debug!("reveal update failed: {e:?}");
                }
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
    for target in &targets {
        observer.observe(target);
    }
    // Page-lifetime observer.
    on_intersect.forget();
    Ok(targets.len() as u32)
}
