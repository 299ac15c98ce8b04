// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Passes become duration slices; reveals and section toggles are instant
//! events stamped with the time of the pass that issued them.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    // Reveal events carry no timestamp of their own.
    let mut pass_start_us = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Classified(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Classified",
                    "cat": "Setup",
                    "ts": ms_to_us(e.timestamp_ms),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "fade": e.fade,
                        "normal": e.normal,
                        "fast": e.fast,
                    }
                }));
            }
            RecordedEvent::PassBegin(e) => {
                pass_start_us = ms_to_us(e.timestamp_ms);
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.trigger),
                    "cat": "Pass",
                    "ts": pass_start_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass_index": e.pass_index,
                        "viewport_height": e.viewport.height,
                        "narrow": e.viewport.narrow,
                    }
                }));
            }
            RecordedEvent::Reveal(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("Reveal{:?}", e.group),
                    "cat": "Pass",
                    "ts": pass_start_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "pass_index": e.pass_index,
                        "position": e.position,
                        "top": e.top,
                        "line": e.line,
                        "delay_s": e.delay,
                        "duration_s": e.duration,
                        "chained": e.chained,
                    }
                }));
            }
            RecordedEvent::PassEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "cat": "Pass",
                    "ts": ms_to_us(e.timestamp_ms),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass_index": e.pass_index,
                        "fade_revealed": e.fade_revealed,
                        "slide_revealed": e.slide_revealed,
                        "skipped": e.skipped,
                    }
                }));
            }
            RecordedEvent::SectionToggle(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": if e.entered { "SectionEntered" } else { "SectionLeft" },
                    "cat": "Section",
                    "ts": ms_to_us(e.timestamp_ms),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ms_to_us(ms: f64) -> f64 {
    ms * 1000.0
}
