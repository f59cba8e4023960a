// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a drifting starfield with a constellation that follows the pointer.
//!
//! Binds a full-window canvas (the `#sky` element of `index.html`, or a fresh
//! canvas appended to `<body>`), attaches a [`StarField`], a [`MouseTracker`]
//! and a [`Constellation`], and runs them on an [`AnimationLoop`]. Pressing
//! Escape signals the surface's stop token.
//!
//! Build with: `wasm-pack build --target web demos/web_constellation`
//!
//! Then serve `demos/web_constellation/` and open `index.html` in a browser.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::string::ToString;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

use starlit_backend_web::{WebSurface, now_ms, seed_from_ms};
use starlit_core::canvas::Rgb;
use starlit_core::constellation::{Constellation, ConstellationConfig};
use starlit_core::layer::LayerHandle;
use starlit_core::mouse::MouseTracker;
use starlit_core::starfield::{StarField, StarFieldConfig};
use starlit_core::surface::{StopToken, UseOptions};

const CANVAS_ID: &str = "sky";
const STAR_COUNT: usize = 180;
const LINE_COLOR: Rgb = Rgb::new(140, 170, 255);

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = find_or_create_canvas(&document)?;

    let web = WebSurface::bind(canvas).map_err(to_js)?;

    let mut stars = StarFieldConfig::new();
    stars.points = STAR_COUNT;
    stars.seed = seed_from_ms(now_ms());
    let mut lines = ConstellationConfig::by_default_aliases();
    lines.color = LINE_COLOR;

    web.use_layer(&LayerHandle::new(StarField::new(stars)), UseOptions::default())
        .and_then(|w| w.use_layer(&LayerHandle::new(MouseTracker::default()), UseOptions::default()))
        .and_then(|w| w.use_layer(&LayerHandle::new(Constellation::new(lines)), UseOptions::default()))
        .map_err(to_js)?;

    stop_on_escape(&window, web.surface().borrow().stop_token())?;

    let animation = web.animation_loop();
    animation.start();
    log::info!("constellation demo running with {STAR_COUNT} stars");

    // There is no graceful shutdown on the web; keep the loop and listeners alive.
    core::mem::forget(animation);
    core::mem::forget(web);

    Ok(())
}

/// Returns the page's `#sky` canvas, or appends a full-window one to `<body>`.
fn find_or_create_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(existing) = document.get_element_by_id(CANVAS_ID) {
        return existing
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("#sky is not a canvas"));
    }
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
    canvas.set_id(CANVAS_ID);
    let style = canvas.style();
    style.set_property("display", "block")?;
    style.set_property("width", "100vw")?;
    style.set_property("height", "100vh")?;
    document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&canvas)?;
    Ok(canvas)
}

fn stop_on_escape(window: &web_sys::Window, stop: StopToken) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if event.key() == "Escape" && !stop.is_stopped() {
            log::info!("stopping animation");
            stop.stop();
        }
    });
    window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn to_js(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}
