// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use reveal_core::trace::{
    ClassifiedEvent, PassBeginEvent, PassEndEvent, RevealEvent, RevealGroup, SectionToggleEvent,
    TraceSink, Trigger,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn trigger_name(trigger: Trigger) -> &'static str {
    match trigger {
        Trigger::Startup => "startup",
        Trigger::Scroll => "scroll",
        Trigger::Resize => "resize",
        Trigger::Manual => "manual",
    }
}

fn group_name(group: RevealGroup) -> &'static str {
    match group {
        RevealGroup::Fade => "fade",
        RevealGroup::Slide => "slide",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_classified(&mut self, e: &ClassifiedEvent) {
        let _ = writeln!(
            self.writer,
            "[classify] fade={} normal={} fast={} at {:.1}ms",
            e.fade, e.normal, e.fast, e.timestamp_ms,
        );
    }

    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let layout = if e.viewport.narrow { "narrow" } else { "wide" };
        let _ = writeln!(
            self.writer,
            "[pass:begin] pass={} {} vh={:.0}px {layout} at {:.1}ms",
            e.pass_index,
            trigger_name(e.trigger),
            e.viewport.height,
            e.timestamp_ms,
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let chain = if e.chained { " +children" } else { "" };
        let _ = writeln!(
            self.writer,
            "[reveal] pass={} {}#{} top={:.1} line={:.1} delay={:.2}s dur={:.2}s{chain}",
            e.pass_index,
            group_name(e.group),
            e.position,
            e.top,
            e.line,
            e.delay,
            e.duration,
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] pass={} fade={} slide={} skipped={} at {:.1}ms",
            e.pass_index, e.fade_revealed, e.slide_revealed, e.skipped, e.timestamp_ms,
        );
    }

    fn on_section_toggle(&mut self, e: &SectionToggleEvent) {
        let state = if e.entered { "entered" } else { "left" };
        let _ = writeln!(
            self.writer,
            "[section] {state} at {:.1}ms",
            e.timestamp_ms,
        );
    }
}
