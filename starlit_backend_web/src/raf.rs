// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` tick source.
//!
//! [`RafLoop`] calls a user callback once per display refresh with a
//! [`FrameTick`]. The callback decides whether the loop goes on: returning
//! [`ControlFlow::Break`] stops it before the next frame is requested, so a
//! frame always finishes before the next one is scheduled.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::ops::ControlFlow;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods; avoids
// fetching (and unwrapping) the Window/Performance objects on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// One `requestAnimationFrame` callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Number of ticks delivered before this one since the loop was created.
    pub frame_index: u64,
    /// The callback's `DOMHighResTimeStamp`, in milliseconds.
    pub timestamp_ms: f64,
}

/// A `requestAnimationFrame` loop.
///
/// Create with [`RafLoop::new`], then call [`start`](Self::start). The loop
/// re-registers itself after each callback that returns
/// [`ControlFlow::Continue`], until the callback breaks, [`stop`](Self::stop)
/// is called, or the `RafLoop` is dropped.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Stored in its own `RefCell` so it can be set once in `start()` and
    /// referenced from inside itself without conflicting with `callback`.
    closure: RefCell<Option<RafClosure>>,

    callback: RefCell<Box<dyn FnMut(FrameTick) -> ControlFlow<()>>>,

    /// Becomes `FrameTick::frame_index`.
    frame_counter: Cell<u64>,

    running: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call.
    raf_id: Cell<i32>,
}

impl RafLoop {
    /// Creates a loop that is **not yet running**.
    pub fn new(callback: impl FnMut(FrameTick) -> ControlFlow<()> + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                frame_counter: Cell::new(0),
                running: Cell::new(false),
                raf_id: Cell::new(0),
            }),
        }
    }

    /// Starts the loop. No-op if already running.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        if self.inner.closure.borrow().is_none() {
            let inner = Rc::clone(&self.inner);
            let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
                if !inner.running.get() {
                    return;
                }

                let frame_index = inner.frame_counter.get();
                inner.frame_counter.set(frame_index + 1);
                let tick = FrameTick {
                    frame_index,
                    timestamp_ms,
                };

                // Scoped so it doesn't overlap with the `closure` RefCell.
                let flow = inner.callback.borrow_mut()(tick);
                if flow.is_break() {
                    inner.running.set(false);
                    return;
                }

                if inner.running.get()
                    && let Some(ref closure) = *inner.closure.borrow()
                {
                    let id = request_animation_frame(closure.as_ref().unchecked_ref());
                    inner.raf_id.set(id);
                }
            }) as Box<dyn FnMut(f64)>);
            *self.inner.closure.borrow_mut() = Some(closure);
        }

        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.raf_id.set(id);
        }
    }

    /// Stops the loop and cancels the pending callback.
    ///
    /// Can be restarted by calling [`start`](Self::start) again.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        cancel_animation_frame(self.inner.raf_id.get());
    }

    /// Returns `true` while the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Number of callbacks delivered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.inner.frame_counter.get()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.inner.running.get())
            .field("frame_counter", &self.inner.frame_counter.get())
            .finish_non_exhaustive()
    }
}
