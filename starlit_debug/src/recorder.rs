// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timestamped in-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and appends every event, with
//! the time it arrived, to a log of owned [`Record`]s. The log can be
//! inspected directly or handed to [`chrome::export`](crate::chrome::export).

use std::time::Instant;

use kurbo::Size;
use starlit_core::trace::{
    BindEvent, FrameBeginEvent, FrameEndEvent, LayerDrawEvent, RegenerateEvent, TraceSink,
    TriangulateEvent,
};

/// An owned copy of one trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`BindEvent`].
    Bind {
        /// Registered alias.
        alias: String,
        /// Draw-order key.
        z_index: i32,
        /// Layer type name.
        type_name: String,
    },
    /// See [`FrameBeginEvent`].
    FrameBegin {
        /// Frame counter.
        frame_index: u64,
        /// Surface size.
        size: Size,
    },
    /// See [`LayerDrawEvent`].
    LayerDraw {
        /// Frame counter.
        frame_index: u64,
        /// Alias of the entry that drew.
        alias: String,
        /// Draw-order key.
        z_index: i32,
    },
    /// See [`RegenerateEvent`].
    Regenerate {
        /// Frame counter.
        frame_index: u64,
        /// Particles respawned.
        count: usize,
    },
    /// See [`TriangulateEvent`].
    Triangulate {
        /// Frame counter.
        frame_index: u64,
        /// Input points.
        points: usize,
        /// Output triangles.
        triangles: usize,
    },
    /// See [`FrameEndEvent`].
    FrameEnd {
        /// Frame counter.
        frame_index: u64,
        /// Entries drawn.
        layers_drawn: usize,
    },
}

/// A recorded event and when it arrived.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Microseconds since the recorder was created.
    pub at_us: f64,
    /// The event.
    pub event: RecordedEvent,
}

type Clock = Box<dyn FnMut() -> f64>;

/// A [`TraceSink`] that keeps every event in memory.
pub struct RecorderSink {
    clock: Clock,
    records: Vec<Record>,
}

impl std::fmt::Debug for RecorderSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecorderSink")
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl Default for RecorderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderSink {
    /// Creates an empty recorder timestamping with the wall clock.
    #[must_use]
    pub fn new() -> Self {
        let start = Instant::now();
        Self::with_clock(move || start.elapsed().as_secs_f64() * 1e6)
    }

    /// Creates an empty recorder that timestamps with `clock` (microseconds).
    #[must_use]
    pub fn with_clock(clock: impl FnMut() -> f64 + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            records: Vec::new(),
        }
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Iterates over the events without timestamps.
    pub fn events(&self) -> impl Iterator<Item = &RecordedEvent> {
        self.records.iter().map(|r| &r.event)
    }

    /// Number of completed frames.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.events()
            .filter(|e| matches!(e, RecordedEvent::FrameEnd { .. }))
            .count()
    }

    fn push(&mut self, event: RecordedEvent) {
        let at_us = (self.clock)();
        self.records.push(Record { at_us, event });
    }
}

impl TraceSink for RecorderSink {
    fn on_bind(&mut self, e: &BindEvent<'_>) {
        self.push(RecordedEvent::Bind {
            alias: e.alias.to_owned(),
            z_index: e.z_index,
            type_name: e.type_name.to_owned(),
        });
    }

    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        self.push(RecordedEvent::FrameBegin {
            frame_index: e.frame_index,
            size: e.size,
        });
    }

    fn on_layer_draw(&mut self, e: &LayerDrawEvent<'_>) {
        self.push(RecordedEvent::LayerDraw {
            frame_index: e.frame_index,
            alias: e.alias.to_owned(),
            z_index: e.z_index,
        });
    }

    fn on_regenerate(&mut self, e: &RegenerateEvent) {
        self.push(RecordedEvent::Regenerate {
            frame_index: e.frame_index,
            count: e.count,
        });
    }

    fn on_triangulate(&mut self, e: &TriangulateEvent) {
        self.push(RecordedEvent::Triangulate {
            frame_index: e.frame_index,
            points: e.points,
            triangles: e.triangles,
        });
    }

    fn on_frame_end(&mut self, e: &FrameEndEvent) {
        self.push(RecordedEvent::FrameEnd {
            frame_index: e.frame_index,
            layers_drawn: e.layers_drawn,
        });
    }
}
