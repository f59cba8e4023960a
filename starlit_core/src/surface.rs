// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root surface: binding, layer attachment, and the frame loop.
//!
//! A [`Surface`] owns a registry, a [`Viewport`], and (once bound) a drawing
//! surface. Layers join with [`use_layer`](Surface::use_layer); each call to
//! [`animate`](Surface::animate) clears the surface and draws every registry
//! entry once, in ascending z-index.
//!
//! # Frame loop
//!
//! `animate` renders exactly one frame. A tick source (e.g. the web backend's
//! `AnimationLoop`) calls it once per display refresh and re-arms only while
//! it returns [`FrameOutcome::Continue`]:
//!
//! ```rust,ignore
//! fn on_tick(surface: &mut Surface<C>) -> bool {
//!     match surface.animate() {
//!         Ok(FrameOutcome::Continue) => true,  // request the next frame
//!         Ok(FrameOutcome::Stopped) => false,  // StopToken::stop() was called
//!         Err(_) => false,                     // a failing frame ends the loop
//!     }
//! }
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::canvas::DrawingSurface;
use crate::error::{BindError, Error, Missing, SurfaceError};
use crate::layer::{
    AnyLayer, BindContext, FrameContext, Layer, LayerHandle, LayerRef, ROOT_ALIAS, RegistryHandle,
    WeakRegistry,
};
use crate::trace::{BindEvent, FrameBeginEvent, FrameEndEvent, LayerDrawEvent, Tracer};
use crate::viewport::Viewport;

/// Type name (and fallback alias) of a surface's own registry slot.
const SURFACE_TYPE_NAME: &str = "surface";

/// Options for [`Surface::use_layer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UseOptions {
    /// Preferred alias. Disambiguated with a numeric suffix on collision.
    pub alias: Option<String>,
    /// Explicit draw-order key. Defaults to the surface's attach counter.
    pub z_index: Option<i32>,
}

impl UseOptions {
    /// Options with a preferred alias.
    #[must_use]
    pub fn alias(alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            z_index: None,
        }
    }

    /// Options with an explicit z-index.
    #[must_use]
    pub fn z_index(z_index: i32) -> Self {
        Self {
            alias: None,
            z_index: Some(z_index),
        }
    }

    /// Sets the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

/// Lifecycle of a surface's animation loop. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// No frame has been drawn yet.
    #[default]
    Idle,
    /// At least one frame has been drawn.
    Running,
    /// The stop token was observed; no further frames are drawn.
    Stopped,
}

/// What a tick source should do after [`Surface::animate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub enum FrameOutcome {
    /// A frame was drawn; request the next one.
    Continue,
    /// The loop was stopped; do not request another frame.
    Stopped,
}

/// Cancellation handle for a surface's animation loop.
///
/// Clones share the same flag. Stopping is permanent.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    /// Requests that the loop stop before its next frame.
    pub fn stop(&self) {
        self.0.set(true);
    }

    /// Returns `true` once [`stop`](Self::stop) was called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// The layer occupying a surface's own registry slot. Draws nothing.
struct SurfaceSlot;

impl Layer for SurfaceSlot {
    fn type_name(&self) -> &'static str {
        SURFACE_TYPE_NAME
    }
}

/// A root-capable drawing surface.
///
/// Owns the registry that attached layers share, the shared [`Viewport`],
/// and optionally a bound [`DrawingSurface`].
pub struct Surface<C> {
    registry: RegistryHandle,
    viewport: Viewport,
    canvas: Option<C>,
    /// The surface's own registry slot.
    slot: AnyLayer,
    /// Auto-increment z-index for attachments without an explicit one.
    next_z: i32,
    parent: Option<WeakRegistry>,
    stop: StopToken,
    run_state: RunState,
    frame_index: u64,
}

impl<C> fmt::Debug for Surface<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("registry", &self.registry)
            .field("viewport", &self.viewport)
            .field("bound", &self.canvas.is_some())
            .field("next_z", &self.next_z)
            .field("attached", &self.parent.is_some())
            .field("run_state", &self.run_state)
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}

impl<C: DrawingSurface> Default for Surface<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: DrawingSurface> Surface<C> {
    /// Creates an unbound surface (deferred binding).
    ///
    /// Layers can be attached right away; [`animate`](Self::animate) fails
    /// until a drawing surface is bound.
    #[must_use]
    pub fn new() -> Self {
        let registry = RegistryHandle::new();
        let slot = LayerHandle::new(SurfaceSlot).erase();
        slot.set_attachment(None, Some(ROOT_ALIAS.into()));
        registry.insert(ROOT_ALIAS.into(), 0, slot.clone());
        Self {
            registry,
            viewport: Viewport::new(),
            canvas: None,
            slot,
            next_z: 0,
            parent: None,
            stop: StopToken::default(),
            run_state: RunState::Idle,
            frame_index: 0,
        }
    }

    /// Creates a surface bound to `canvas`.
    #[must_use]
    pub fn with_canvas(canvas: C) -> Self {
        let mut surface = Self::new();
        surface.bind_canvas(canvas);
        surface
    }

    /// Binds a drawing surface.
    ///
    /// Captures its client size into the shared viewport and has it adopt
    /// that pixel size. Replaces any previously bound surface.
    pub fn bind_canvas(&mut self, mut canvas: C) {
        let size = canvas.client_size();
        canvas.adopt_size(size);
        self.viewport.resize(size);
        self.canvas = Some(canvas);
    }

    /// Re-captures the bound surface's client size after an external resize.
    pub fn resize(&mut self) -> Result<Size, SurfaceError> {
        let canvas = self
            .canvas
            .as_mut()
            .ok_or(SurfaceError::NotInitialized(Missing::Canvas))?;
        let size = canvas.client_size();
        canvas.adopt_size(size);
        self.viewport.resize(size);
        Ok(size)
    }

    /// The bound drawing surface.
    pub fn canvas(&self) -> Result<&C, SurfaceError> {
        self.canvas
            .as_ref()
            .ok_or(SurfaceError::NotInitialized(Missing::Canvas))
    }

    /// The bound drawing surface, mutably.
    pub fn canvas_mut(&mut self) -> Result<&mut C, SurfaceError> {
        self.canvas
            .as_mut()
            .ok_or(SurfaceError::NotInitialized(Missing::Canvas))
    }
}

impl<C> Surface<C> {
    /// The shared viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The registry this surface (and everything attached to it) observes.
    #[must_use]
    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    /// This surface's own alias: [`ROOT_ALIAS`] unless it was attached to a parent.
    #[must_use]
    pub fn alias(&self) -> String {
        self.slot.alias().unwrap_or_else(|| ROOT_ALIAS.into())
    }

    /// `(alias, z_index)` of every registry entry, in draw order.
    #[must_use]
    pub fn draw_order(&self) -> Vec<(String, i32)> {
        self.registry.entries()
    }

    /// Every registered alias, in draw order.
    #[must_use]
    pub fn aliases(&self) -> Vec<String> {
        self.registry
            .entries()
            .into_iter()
            .map(|(alias, _)| alias)
            .collect()
    }

    /// Resolves an alias (or passes an instance through).
    pub fn resolve_layer(&self, target: impl Into<LayerRef>) -> Result<AnyLayer, BindError> {
        self.registry.resolve(&target.into())
    }

    /// A cloneable handle that stops this surface's loop.
    #[must_use]
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// The loop's lifecycle state.
    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Number of frames drawn so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Attaches `layer`. Returns `self` so attachments can be chained.
    pub fn use_layer<L: Layer + 'static>(
        &mut self,
        layer: &LayerHandle<L>,
        options: UseOptions,
    ) -> Result<&mut Self, BindError> {
        self.use_layer_traced(layer, options, &mut Tracer::none())
    }

    /// Like [`use_layer`](Self::use_layer), reporting a [`BindEvent`].
    pub fn use_layer_traced<L: Layer + 'static>(
        &mut self,
        layer: &LayerHandle<L>,
        options: UseOptions,
        tracer: &mut Tracer<'_>,
    ) -> Result<&mut Self, BindError> {
        self.use_any(&layer.erase(), options, tracer)?;
        Ok(self)
    }

    /// Attaches a type-erased layer.
    pub fn use_any(
        &mut self,
        layer: &AnyLayer,
        options: UseOptions,
        tracer: &mut Tracer<'_>,
    ) -> Result<String, BindError> {
        if layer.is_attached() {
            return Err(BindError::AlreadyAttached);
        }

        let (default_alias, type_name) = {
            let l = layer
                .layer()
                .try_borrow()
                .map_err(|_| BindError::LayerBusy)?;
            (l.default_alias(), l.type_name())
        };
        let alias = self.registry.unique_alias(&[
            options.alias.as_deref(),
            default_alias,
            Some(type_name),
        ]);
        // The counter only advances once the bind sticks.
        let z_index = options.z_index.unwrap_or(self.next_z);

        self.registry.insert(alias.clone(), z_index, layer.clone());
        layer.set_attachment(Some(self.registry.downgrade()), Some(alias.clone()));

        let bound = {
            let mut cx = BindContext::new(&self.registry, &self.viewport, &alias);
            layer.layer().borrow_mut().on_bind(&mut cx)
        };
        if let Err(e) = bound {
            self.registry.remove(&alias);
            layer.set_attachment(None, None);
            return Err(e);
        }
        if options.z_index.is_none() {
            self.next_z += 1;
        }

        tracer.bind(&BindEvent {
            alias: &alias,
            z_index,
            type_name,
        });
        Ok(alias)
    }

    /// Binds this surface to `parent`.
    ///
    /// This surface's own slot is re-aliased (caller alias, else `"surface"`),
    /// every entry of its registry is merged into the parent's, and from then
    /// on it observes the parent's registry and viewport. Colliding aliases
    /// get a numeric suffix. The slot takes the caller's z-index, else the
    /// parent's next one; merged entries keep theirs.
    pub fn attach_to<P>(
        &mut self,
        parent: &mut Surface<P>,
        options: UseOptions,
    ) -> Result<String, BindError> {
        self.attach_to_traced(parent, options, &mut Tracer::none())
    }

    /// Like [`attach_to`](Self::attach_to), reporting a [`BindEvent`] per merged entry.
    pub fn attach_to_traced<P>(
        &mut self,
        parent: &mut Surface<P>,
        options: UseOptions,
        tracer: &mut Tracer<'_>,
    ) -> Result<String, BindError> {
        if self.parent.is_some() || self.registry.ptr_eq(&parent.registry) {
            return Err(BindError::AlreadyAttached);
        }

        let new_alias = parent.registry.unique_alias(&[
            options.alias.as_deref(),
            None,
            Some(SURFACE_TYPE_NAME),
        ]);
        let slot_z = options.z_index.unwrap_or_else(|| parent.take_z());

        let weak = parent.registry.downgrade();
        let mut entries = self.registry.drain();
        // Own slot first, so its alias is taken before the rest are disambiguated.
        entries.sort_by_key(|e| !e.layer.ptr_eq(&self.slot));
        for entry in entries {
            let (alias, z_index) = if entry.layer.ptr_eq(&self.slot) {
                (new_alias.clone(), slot_z)
            } else {
                (
                    parent.registry.unique_alias(&[Some(&entry.alias)]),
                    entry.z_index,
                )
            };
            entry
                .layer
                .set_attachment(Some(weak.clone()), Some(alias.clone()));
            tracer.bind(&BindEvent {
                alias: &alias,
                z_index,
                type_name: entry.layer.type_name().unwrap_or(SURFACE_TYPE_NAME),
            });
            parent.registry.insert(alias, z_index, entry.layer);
        }

        self.viewport.transfer_pointers(&parent.viewport);
        self.registry = parent.registry.clone();
        self.viewport = parent.viewport.clone();
        self.parent = Some(weak);
        Ok(new_alias)
    }

    /// Returns `true` once this surface was attached to a parent.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.parent.as_ref().is_some_and(|p| p.upgrade().is_some())
    }

    /// Post-increments the attach counter.
    fn take_z(&mut self) -> i32 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }
}

impl<C: DrawingSurface> Surface<C> {
    /// Renders one frame.
    ///
    /// Clears the whole surface, then draws every registry entry in ascending
    /// z-index (ties in attach order, this surface's own slot included).
    ///
    /// Returns [`FrameOutcome::Stopped`] without drawing once the stop token
    /// was signalled. A failing layer aborts the frame and returns its error;
    /// callers must not request another frame after an error.
    pub fn animate(&mut self) -> Result<FrameOutcome, Error> {
        self.animate_traced(&mut Tracer::none())
    }

    /// Like [`animate`](Self::animate), reporting frame and layer events.
    pub fn animate_traced(&mut self, tracer: &mut Tracer<'_>) -> Result<FrameOutcome, Error> {
        if self.run_state == RunState::Stopped || self.stop.is_stopped() {
            self.run_state = RunState::Stopped;
            return Ok(FrameOutcome::Stopped);
        }
        let canvas = self
            .canvas
            .as_mut()
            .ok_or(SurfaceError::NotInitialized(Missing::Context))?;
        self.run_state = RunState::Running;

        let frame_index = self.frame_index;
        let size = self.viewport.size();
        canvas.clear_rect(Rect::from_origin_size(Point::ORIGIN, size));
        tracer.frame_begin(&FrameBeginEvent { frame_index, size });

        let order = self.registry.draw_order();
        for (alias, z_index, layer) in &order {
            {
                let mut cx = FrameContext::new(&mut *canvas, size, frame_index, tracer);
                layer.layer().borrow_mut().draw_frame(&mut cx)?;
            }
            tracer.layer_draw(&LayerDrawEvent {
                frame_index,
                alias,
                z_index: *z_index,
            });
        }

        tracer.frame_end(&FrameEndEvent {
            frame_index,
            layers_drawn: order.len(),
        });
        self.frame_index += 1;
        Ok(FrameOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::error::DrawError;

    fn canvas() -> RecordingCanvas {
        RecordingCanvas::new(Size::new(800.0, 600.0))
    }

    struct Probe {
        log: Rc<core::cell::RefCell<Vec<String>>>,
        label: &'static str,
        fail: bool,
    }

    impl Layer for Probe {
        fn type_name(&self) -> &'static str {
            "probe"
        }

        fn draw_frame(&mut self, _cx: &mut FrameContext<'_, '_>) -> Result<(), DrawError> {
            self.log.borrow_mut().push(self.label.to_string());
            if self.fail {
                Err(DrawError::MissingDependency(crate::error::Dependency::Dots))
            } else {
                Ok(())
            }
        }
    }

    /// Refuses every bind.
    struct Rejecting;

    impl Layer for Rejecting {
        fn type_name(&self) -> &'static str {
            "rejecting"
        }

        fn on_bind(&mut self, _cx: &mut BindContext<'_>) -> Result<(), BindError> {
            Err(BindError::UnknownAlias("nowhere".into()))
        }
    }

    fn probe(log: &Rc<core::cell::RefCell<Vec<String>>>, label: &'static str) -> LayerHandle<Probe> {
        LayerHandle::new(Probe {
            log: log.clone(),
            label,
            fail: false,
        })
    }

    #[test]
    fn bind_captures_and_adopts_size() {
        let surface = Surface::with_canvas(canvas());
        assert_eq!(surface.viewport().size(), Size::new(800.0, 600.0));
        assert_eq!(
            surface.canvas().unwrap().pixel_size(),
            Some(Size::new(800.0, 600.0))
        );
    }

    #[test]
    fn resize_recaptures_size() {
        let mut surface = Surface::with_canvas(canvas());
        surface
            .canvas_mut()
            .unwrap()
            .set_client_size(Size::new(1024.0, 768.0));
        assert_eq!(surface.resize().unwrap(), Size::new(1024.0, 768.0));
        assert_eq!(surface.viewport().size(), Size::new(1024.0, 768.0));
    }

    #[test]
    fn unbound_surface_reports_missing_pieces() {
        let mut surface: Surface<RecordingCanvas> = Surface::new();
        assert_eq!(
            surface.resize().unwrap_err(),
            SurfaceError::NotInitialized(Missing::Canvas)
        );
        assert_eq!(
            surface.animate().unwrap_err(),
            Error::Surface(SurfaceError::NotInitialized(Missing::Context))
        );
    }

    #[test]
    fn root_holds_reserved_alias() {
        let surface: Surface<RecordingCanvas> = Surface::new();
        assert_eq!(surface.aliases(), vec![ROOT_ALIAS]);
        assert_eq!(surface.alias(), ROOT_ALIAS);
    }

    #[test]
    fn caller_cannot_take_root_alias() {
        let log = Rc::default();
        let mut surface: Surface<RecordingCanvas> = Surface::new();
        let p = probe(&log, "p");
        surface.use_layer(&p, UseOptions::alias(ROOT_ALIAS)).unwrap();
        assert_eq!(p.alias().as_deref(), Some("root2"));
    }

    #[test]
    fn use_is_chainable_and_counts_z() {
        let log = Rc::default();
        let mut surface: Surface<RecordingCanvas> = Surface::new();
        surface
            .use_layer(&probe(&log, "a"), UseOptions::default())
            .unwrap()
            .use_layer(&probe(&log, "b"), UseOptions::default())
            .unwrap();
        assert_eq!(
            surface.draw_order(),
            vec![
                ("root".to_string(), 0),
                ("probe".to_string(), 0),
                ("probe2".to_string(), 1),
            ]
        );
    }

    #[test]
    fn draws_in_ascending_z_order() {
        let log = Rc::default();
        let mut surface = Surface::with_canvas(canvas());
        for (label, z) in [("five", 5), ("one", 1), ("three", 3)] {
            surface
                .use_layer(&probe(&log, label), UseOptions::z_index(z))
                .unwrap();
        }
        assert_eq!(surface.animate().unwrap(), FrameOutcome::Continue);
        assert_eq!(*log.borrow(), vec!["one", "three", "five"]);
    }

    #[test]
    fn clear_precedes_all_draws() {
        let mut surface = Surface::with_canvas(canvas());
        let log = Rc::default();
        surface.use_layer(&probe(&log, "a"), UseOptions::default()).unwrap();
        let _ = surface.animate().unwrap();
        assert_eq!(
            surface.canvas().unwrap().commands().first(),
            Some(&DrawCommand::ClearRect(Rect::new(0.0, 0.0, 800.0, 600.0)))
        );
    }

    #[test]
    fn reattach_fails_and_leaves_first_root_untouched() {
        let log = Rc::default();
        let mut a: Surface<RecordingCanvas> = Surface::new();
        let mut b: Surface<RecordingCanvas> = Surface::new();
        let p = probe(&log, "p");
        a.use_layer(&p, UseOptions::default()).unwrap();
        let before = a.draw_order();

        let err = b.use_layer(&p, UseOptions::default()).unwrap_err();
        assert_eq!(err, BindError::AlreadyAttached);
        assert_eq!(a.draw_order(), before);
        assert_eq!(b.aliases(), vec![ROOT_ALIAS]);

        let err = a.use_layer(&p, UseOptions::default()).unwrap_err();
        assert_eq!(err, BindError::AlreadyAttached);
    }

    #[test]
    fn stop_token_ends_the_loop() {
        let mut surface = Surface::with_canvas(canvas());
        assert_eq!(surface.run_state(), RunState::Idle);
        assert_eq!(surface.animate().unwrap(), FrameOutcome::Continue);
        assert_eq!(surface.run_state(), RunState::Running);

        let token = surface.stop_token();
        token.stop();
        surface.canvas_mut().unwrap().clear_commands();
        assert_eq!(surface.animate().unwrap(), FrameOutcome::Stopped);
        assert_eq!(surface.run_state(), RunState::Stopped);
        assert!(surface.canvas().unwrap().commands().is_empty());
        assert_eq!(surface.frame_index(), 1);
    }

    #[test]
    fn failing_layer_aborts_the_frame() {
        let log: Rc<core::cell::RefCell<Vec<String>>> = Rc::default();
        let mut surface = Surface::with_canvas(canvas());
        let bad = LayerHandle::new(Probe {
            log: log.clone(),
            label: "bad",
            fail: true,
        });
        surface.use_layer(&bad, UseOptions::z_index(1)).unwrap();
        surface.use_layer(&probe(&log, "after"), UseOptions::z_index(2)).unwrap();

        assert!(matches!(surface.animate(), Err(Error::Draw(_))));
        assert_eq!(*log.borrow(), vec!["bad"]);
        assert_eq!(surface.frame_index(), 0);
    }

    #[test]
    fn attach_surface_merges_registry() {
        let log = Rc::default();
        let mut root: Surface<RecordingCanvas> = Surface::new();
        root.use_layer(&probe(&log, "r"), UseOptions::default()).unwrap();

        let mut child: Surface<RecordingCanvas> = Surface::new();
        child.use_layer(&probe(&log, "c"), UseOptions::z_index(7)).unwrap();

        let alias = child.attach_to(&mut root, UseOptions::default()).unwrap();
        assert_eq!(alias, "surface");
        assert!(child.registry().ptr_eq(root.registry()));
        assert!(child.viewport().ptr_eq(root.viewport()));
        assert_eq!(child.alias(), "surface");
        assert_eq!(
            root.draw_order(),
            vec![
                ("root".to_string(), 0),
                ("probe".to_string(), 0),
                ("surface".to_string(), 1),
                ("probe2".to_string(), 7),
            ]
        );

        // Later attachments through the child land in the shared registry.
        child.use_layer(&probe(&log, "late"), UseOptions::default()).unwrap();
        assert!(root.registry().contains("probe3"));

        let mut other: Surface<RecordingCanvas> = Surface::new();
        assert_eq!(
            child.attach_to(&mut other, UseOptions::default()).unwrap_err(),
            BindError::AlreadyAttached
        );
    }

    #[test]
    fn merged_child_entries_never_shadow_the_child_slot() {
        let log = Rc::default();
        let mut root: Surface<RecordingCanvas> = Surface::new();
        let mut child: Surface<RecordingCanvas> = Surface::new();
        let p = probe(&log, "c");
        child
            .use_layer(&p, UseOptions::alias("surface").with_z_index(3))
            .unwrap();

        let alias = child
            .attach_to(&mut root, UseOptions::default().with_z_index(9))
            .unwrap();
        assert_eq!(alias, "surface");
        assert_eq!(p.alias().as_deref(), Some("surface2"));
        assert_eq!(root.registry().z_index("surface"), Some(9));
        assert_eq!(root.registry().z_index("surface2"), Some(3));
    }

    #[test]
    fn attached_child_slot_takes_the_parents_next_z() {
        let log = Rc::default();
        let mut root: Surface<RecordingCanvas> = Surface::new();
        root.use_layer(&probe(&log, "d"), UseOptions::alias("d")).unwrap();
        let mut child: Surface<RecordingCanvas> = Surface::new();
        child.attach_to(&mut root, UseOptions::default()).unwrap();
        root.use_layer(&probe(&log, "d2"), UseOptions::alias("d2")).unwrap();

        assert_eq!(
            root.draw_order(),
            vec![
                ("root".to_string(), 0),
                ("d".to_string(), 0),
                ("surface".to_string(), 1),
                ("d2".to_string(), 2),
            ],
            "child slot should sit between the two root layers"
        );
    }

    #[test]
    fn rejected_bind_leaves_z_counter_alone() {
        let log = Rc::default();
        let mut surface: Surface<RecordingCanvas> = Surface::new();
        let err = surface
            .use_layer(&LayerHandle::new(Rejecting), UseOptions::default())
            .unwrap_err();
        assert_eq!(err, BindError::UnknownAlias("nowhere".into()), "on_bind error propagates");
        assert!(!surface.registry().contains("rejecting"), "entry rolled back");

        surface.use_layer(&probe(&log, "a"), UseOptions::default()).unwrap();
        assert_eq!(
            surface.draw_order(),
            vec![("root".to_string(), 0), ("probe".to_string(), 0)],
            "no z gap after a rollback"
        );
    }

    #[test]
    fn borrowed_layer_is_busy_not_attached() {
        let log = Rc::default();
        let mut surface: Surface<RecordingCanvas> = Surface::new();
        let p = probe(&log, "held");
        let guard = p.borrow_mut();
        assert_eq!(
            surface.use_layer(&p, UseOptions::default()).unwrap_err(),
            BindError::LayerBusy,
            "a borrowed layer is not reported as attached"
        );
        drop(guard);
        assert!(!p.is_attached(), "failed bind leaves the layer detached");
        surface.use_layer(&p, UseOptions::default()).unwrap();
        assert_eq!(p.alias().as_deref(), Some("probe"), "bind succeeds once released");
    }
}
