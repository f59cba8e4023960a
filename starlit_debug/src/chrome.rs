// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads records from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Frames become `B`/`E` duration pairs, layer draws and binds become instant
//! events, and particle respawns and triangle counts become counter tracks.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{Record, RecordedEvent};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(records: &[Record], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = records.iter().map(to_trace_event).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_trace_event(record: &Record) -> Value {
    let ts = record.at_us;
    match &record.event {
        RecordedEvent::Bind {
            alias,
            z_index,
            type_name,
        } => json!({
            "ph": "i",
            "name": "Bind",
            "cat": "Registry",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "s": "g",
            "args": {
                "alias": alias,
                "z_index": z_index,
                "type_name": type_name,
            }
        }),
        RecordedEvent::FrameBegin { frame_index, size } => json!({
            "ph": "B",
            "name": "Frame",
            "cat": "Frame",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "args": {
                "frame_index": frame_index,
                "width": size.width,
                "height": size.height,
            }
        }),
        RecordedEvent::LayerDraw {
            frame_index,
            alias,
            z_index,
        } => json!({
            "ph": "i",
            "name": alias,
            "cat": "Layer",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "s": "t",
            "args": {
                "frame_index": frame_index,
                "z_index": z_index,
            }
        }),
        RecordedEvent::Regenerate { frame_index, count } => json!({
            "ph": "C",
            "name": "Respawned",
            "cat": "StarField",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "args": {
                "count": count,
                "frame_index": frame_index,
            }
        }),
        RecordedEvent::Triangulate {
            frame_index,
            points,
            triangles,
        } => json!({
            "ph": "C",
            "name": "Triangulation",
            "cat": "Constellation",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "args": {
                "points": points,
                "triangles": triangles,
                "frame_index": frame_index,
            }
        }),
        RecordedEvent::FrameEnd {
            frame_index,
            layers_drawn,
        } => json!({
            "ph": "E",
            "name": "Frame",
            "cat": "Frame",
            "ts": ts,
            "pid": 0,
            "tid": 0,
            "args": {
                "frame_index": frame_index,
                "layers_drawn": layers_drawn,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use kurbo::Size;
    use starlit_core::trace::{FrameBeginEvent, FrameEndEvent, LayerDrawEvent, TraceSink};

    #[test]
    fn export_produces_valid_json() {
        let mut t = 0.0;
        let mut rec = RecorderSink::with_clock(move || {
            t += 100.0;
            t
        });
        rec.on_frame_begin(&FrameBeginEvent {
            frame_index: 0,
            size: Size::new(800.0, 600.0),
        });
        rec.on_layer_draw(&LayerDrawEvent {
            frame_index: 0,
            alias: "starfield",
            z_index: 0,
        });
        rec.on_frame_end(&FrameEndEvent {
            frame_index: 0,
            layers_drawn: 1,
        });

        let mut out = Vec::new();
        export(rec.records(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "Frame");
        assert_eq!(parsed[0]["args"]["width"], 800.0);

        assert_eq!(parsed[1]["ph"], "i");
        assert_eq!(parsed[1]["name"], "starfield");
        assert_eq!(parsed[1]["ts"], 200.0);

        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["args"]["layers_drawn"], 1);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
