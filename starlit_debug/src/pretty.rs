// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use starlit_core::trace::{
    BindEvent, FrameBeginEvent, FrameEndEvent, LayerDrawEvent, RegenerateEvent, TraceSink,
    TriangulateEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    /// Skip per-layer lines; frame and bind lines are still written.
    quiet_layers: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("quiet_layers", &self.quiet_layers)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            quiet_layers: false,
        }
    }

    /// Stops writing a line per drawn layer.
    #[must_use]
    pub fn quiet_layers(mut self) -> Self {
        self.quiet_layers = true;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_bind(&mut self, e: &BindEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[bind] alias={} z={} type={}",
            e.alias, e.z_index, e.type_name,
        );
    }

    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[frame:begin] frame={} size={}x{}",
            e.frame_index, e.size.width, e.size.height,
        );
    }

    fn on_layer_draw(&mut self, e: &LayerDrawEvent<'_>) {
        if self.quiet_layers {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[layer] frame={} alias={} z={}",
            e.frame_index, e.alias, e.z_index,
        );
    }

    fn on_regenerate(&mut self, e: &RegenerateEvent) {
        let _ = writeln!(
            self.writer,
            "[regenerate] frame={} count={}",
            e.frame_index, e.count,
        );
    }

    fn on_triangulate(&mut self, e: &TriangulateEvent) {
        let _ = writeln!(
            self.writer,
            "[triangulate] frame={} points={} triangles={}",
            e.frame_index, e.points, e.triangles,
        );
    }

    fn on_frame_end(&mut self, e: &FrameEndEvent) {
        let _ = writeln!(
            self.writer,
            "[frame:end] frame={} layers={}",
            e.frame_index, e.layers_drawn,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn pretty_print_frame() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_frame_begin(&FrameBeginEvent {
            frame_index: 1,
            size: Size::new(800.0, 600.0),
        });
        sink.on_layer_draw(&LayerDrawEvent {
            frame_index: 1,
            alias: "starfield",
            z_index: 0,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("[frame:begin] frame=1 size=800x600"), "got: {output}");
        assert!(output.contains("alias=starfield"), "got: {output}");
    }

    #[test]
    fn quiet_layers_skips_layer_lines() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).quiet_layers();
        sink.on_layer_draw(&LayerDrawEvent {
            frame_index: 0,
            alias: "mouse",
            z_index: 1,
        });
        sink.on_frame_end(&FrameEndEvent {
            frame_index: 0,
            layers_drawn: 2,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert_eq!(output, "[frame:end] frame=0 layers=2\n");
    }
}
