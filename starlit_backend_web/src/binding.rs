// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding a [`Surface`] to the page.
//!
//! [`WebSurface`] resolves a bind target to a `<canvas>`, binds it, and
//! installs the two window listeners the core needs: `resize` re-captures the
//! canvas size, `pointermove` feeds the shared viewport's pointer bus.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use starlit_core::error::BindError;
use starlit_core::layer::{Layer, LayerHandle};
use starlit_core::surface::{Surface, UseOptions};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent};

use crate::animation::AnimationLoop;
use crate::canvas::{CanvasTarget, element_offset};

/// What to bind a [`WebSurface`] to.
#[derive(Clone, Debug)]
pub enum BindTarget {
    /// A canvas element the caller already holds.
    Canvas(HtmlCanvasElement),
    /// A CSS selector for a canvas element.
    Selector(String),
}

impl From<HtmlCanvasElement> for BindTarget {
    fn from(element: HtmlCanvasElement) -> Self {
        Self::Canvas(element)
    }
}

impl From<&str> for BindTarget {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.into())
    }
}

impl From<String> for BindTarget {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

/// A window event listener, removed again on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn install(
        target: &EventTarget,
        event: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::warn!("could not listen for `{event}`: {e:?}");
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// A root [`Surface`] bound to a page canvas.
///
/// Holds the surface behind `Rc<RefCell<_>>` so the listeners and the
/// [`AnimationLoop`] can share it. Dropping the `WebSurface` removes the
/// listeners.
pub struct WebSurface {
    surface: Rc<RefCell<Surface<CanvasTarget>>>,
    element: Option<HtmlCanvasElement>,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for WebSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebSurface")
            .field("surface", &self.surface)
            .field("bound", &self.element.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl WebSurface {
    /// A surface with no canvas and no listeners (deferred binding).
    #[must_use]
    pub fn deferred() -> Self {
        Self {
            surface: Rc::new(RefCell::new(Surface::new())),
            element: None,
            listeners: Vec::new(),
        }
    }

    /// Resolves `target`, binds it, and installs the window listeners.
    ///
    /// A selector that matches nothing is not an error: the surface stays
    /// unbound (logged at `warn`) and [`Surface::animate`] later fails with
    /// `context not initialized`. A malformed selector, or one that matches a
    /// non-canvas element, fails with [`BindError::InvalidSelector`].
    pub fn bind(target: impl Into<BindTarget>) -> Result<Self, BindError> {
        let element = match target.into() {
            BindTarget::Canvas(element) => Some(element),
            BindTarget::Selector(selector) => query_canvas(&selector)?,
        };

        let mut web = Self::deferred();
        if let Some(element) = &element {
            match CanvasTarget::new(element.clone()) {
                Ok(canvas) => {
                    web.surface.borrow_mut().bind_canvas(canvas);
                    let size = web.surface.borrow().viewport().size();
                    log::debug!("bound canvas at {}x{}", size.width, size.height);
                }
                Err(e) => log::warn!("canvas bound without drawing context: {e}"),
            }
        }
        web.element = element;
        web.install_listeners();
        Ok(web)
    }

    /// The shared surface.
    #[must_use]
    pub fn surface(&self) -> &Rc<RefCell<Surface<CanvasTarget>>> {
        &self.surface
    }

    /// The bound canvas element, if any.
    #[must_use]
    pub fn element(&self) -> Option<&HtmlCanvasElement> {
        self.element.as_ref()
    }

    /// Attaches `layer` to the surface. Returns `self` for chaining.
    pub fn use_layer<L: Layer + 'static>(
        &self,
        layer: &LayerHandle<L>,
        options: UseOptions,
    ) -> Result<&Self, BindError> {
        self.surface.borrow_mut().use_layer(layer, options)?;
        Ok(self)
    }

    /// A requestAnimationFrame loop over this surface (not yet started).
    #[must_use]
    pub fn animation_loop(&self) -> AnimationLoop {
        AnimationLoop::new(Rc::clone(&self.surface))
    }

    fn install_listeners(&mut self) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window; resize and pointer listeners not installed");
            return;
        };
        let target: EventTarget = window.into();

        if self.element.is_some() {
            let surface = Rc::clone(&self.surface);
            let resize = Listener::install(&target, "resize", move |_| {
                let Ok(mut surface) = surface.try_borrow_mut() else {
                    return;
                };
                match surface.resize() {
                    Ok(size) => log::debug!("resized to {}x{}", size.width, size.height),
                    Err(e) => log::warn!("resize ignored: {e}"),
                }
            });
            self.listeners.extend(resize);
        }

        let viewport = self.surface.borrow().viewport().clone();
        let element = self.element.clone();
        let pointer = Listener::install(&target, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let client = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            let offset = element.as_ref().map_or(Point::ZERO, element_offset);
            viewport.dispatch_pointer(client, offset);
        });
        self.listeners.extend(pointer);
    }
}

/// Looks up a canvas by CSS selector.
fn query_canvas(selector: &str) -> Result<Option<HtmlCanvasElement>, BindError> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document; `{selector}` left unresolved");
        return Ok(None);
    };
    let found = document
        .query_selector(selector)
        .map_err(|_| BindError::InvalidSelector(selector.into()))?;
    match found {
        None => {
            log::warn!("no element matches `{selector}`; canvas left unset");
            Ok(None)
        }
        Some(element) => element
            .dyn_into::<HtmlCanvasElement>()
            .map(Some)
            .map_err(|_| BindError::InvalidSelector(selector.into())),
    }
}
