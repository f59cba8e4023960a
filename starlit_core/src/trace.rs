// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for binding and the frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! instrumentation calls at each stage. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use kurbo::Size;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a layer or surface is attached to a registry.
#[derive(Clone, Copy, Debug)]
pub struct BindEvent<'a> {
    /// The alias the entry was registered under.
    pub alias: &'a str,
    /// The entry's draw-order key.
    pub z_index: i32,
    /// The layer's type name.
    pub type_name: &'a str,
}

/// Emitted after the surface is cleared, before any layer draws.
#[derive(Clone, Copy, Debug)]
pub struct FrameBeginEvent {
    /// Monotonic frame counter of the root surface.
    pub frame_index: u64,
    /// Surface size for this frame.
    pub size: Size,
}

/// Emitted after one registry entry finished drawing.
#[derive(Clone, Copy, Debug)]
pub struct LayerDrawEvent<'a> {
    /// Frame counter.
    pub frame_index: u64,
    /// Alias of the entry that drew.
    pub alias: &'a str,
    /// Draw-order key of the entry.
    pub z_index: i32,
}

/// Emitted when a starfield respawned particles during a frame.
#[derive(Clone, Copy, Debug)]
pub struct RegenerateEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Number of particles respawned this frame.
    pub count: usize,
}

/// Emitted when a constellation ran a triangulation.
#[derive(Clone, Copy, Debug)]
pub struct TriangulateEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Number of input points (mouse included).
    pub points: usize,
    /// Number of triangles produced.
    pub triangles: usize,
}

/// Emitted after every entry drew.
#[derive(Clone, Copy, Debug)]
pub struct FrameEndEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Number of registry entries drawn.
    pub layers_drawn: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an entry is attached.
    fn on_bind(&mut self, e: &BindEvent<'_>) {
        _ = e;
    }

    /// Called at the start of a frame.
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        _ = e;
    }

    /// Called after each entry draws.
    fn on_layer_draw(&mut self, e: &LayerDrawEvent<'_>) {
        _ = e;
    }

    /// Called when particles were respawned.
    fn on_regenerate(&mut self, e: &RegenerateEvent) {
        _ = e;
    }

    /// Called when a triangulation ran.
    fn on_triangulate(&mut self, e: &TriangulateEvent) {
        _ = e;
    }

    /// Called at the end of a frame.
    fn on_frame_end(&mut self, e: &FrameEndEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`BindEvent`].
    #[inline]
    pub fn bind(&mut self, e: &BindEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_bind(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameBeginEvent`].
    #[inline]
    pub fn frame_begin(&mut self, e: &FrameBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayerDrawEvent`].
    #[inline]
    pub fn layer_draw(&mut self, e: &LayerDrawEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layer_draw(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RegenerateEvent`].
    #[inline]
    pub fn regenerate(&mut self, e: &RegenerateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_regenerate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TriangulateEvent`].
    #[inline]
    pub fn triangulate(&mut self, e: &TriangulateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_triangulate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEndEvent`].
    #[inline]
    pub fn frame_end(&mut self, e: &FrameEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
