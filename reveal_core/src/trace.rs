// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the reveal loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! orchestrator and evaluator call at each stage. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`LogSink`] forwards events to the [`log`] crate at debug level.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::geometry::ViewportState;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What caused an evaluation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The immediate pass at the end of startup.
    Startup,
    /// A scroll event on the scrolling container.
    Scroll,
    /// A viewport resize.
    Resize,
    /// An explicit refresh requested by the embedder.
    Manual,
}

/// Which group a reveal request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealGroup {
    /// Opacity-only reveal.
    Fade,
    /// Slide-and-fade reveal.
    Slide,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once classification has finished.
#[derive(Clone, Copy, Debug)]
pub struct ClassifiedEvent {
    /// Host time in milliseconds.
    pub timestamp_ms: f64,
    /// Number of fade elements.
    pub fade: usize,
    /// Number of normal slide elements.
    pub normal: usize,
    /// Number of fast slide elements.
    pub fast: usize,
}

/// Marks the beginning of an evaluation pass.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// What caused the pass.
    pub trigger: Trigger,
    /// Viewport sampled for this pass.
    pub viewport: ViewportState,
    /// Host time in milliseconds.
    pub timestamp_ms: f64,
}

/// Emitted for every reveal animation request.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// Pass that issued the request.
    pub pass_index: u64,
    /// Fade or slide.
    pub group: RevealGroup,
    /// Position of the element within its group.
    pub position: usize,
    /// Element top edge, viewport-relative.
    pub top: f64,
    /// Trigger line the top edge crossed.
    pub line: f64,
    /// Requested start delay in seconds.
    pub delay: f64,
    /// Requested duration in seconds.
    pub duration: f64,
    /// Whether accordion children are chained after this reveal.
    pub chained: bool,
}

/// Marks the end of an evaluation pass.
#[derive(Clone, Copy, Debug)]
pub struct PassEndEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Fade reveals requested.
    pub fade_revealed: usize,
    /// Slide reveals requested.
    pub slide_revealed: usize,
    /// Elements skipped because they were detached.
    pub skipped: usize,
    /// Host time in milliseconds.
    pub timestamp_ms: f64,
}

/// Emitted when the watched section enters or leaves the trigger line.
#[derive(Clone, Copy, Debug)]
pub struct SectionToggleEvent {
    /// `true` on entry, `false` on exit.
    pub entered: bool,
    /// Host time in milliseconds.
    pub timestamp_ms: f64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the reveal loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after classification.
    fn on_classified(&mut self, e: &ClassifiedEvent) {
        _ = e;
    }

    /// Called at the beginning of an evaluation pass.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called for each reveal animation request.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called at the end of an evaluation pass.
    fn on_pass_end(&mut self, e: &PassEndEvent) {
        _ = e;
    }

    /// Called when the section background toggles.
    fn on_section_toggle(&mut self, e: &SectionToggleEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink / LogSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// A [`TraceSink`] that forwards events to the `log` crate at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn on_classified(&mut self, e: &ClassifiedEvent) {
        log::debug!(
            "classified fade={} normal={} fast={}",
            e.fade,
            e.normal,
            e.fast
        );
    }

    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        log::debug!(
            "pass {} begin trigger={:?} vh={} narrow={}",
            e.pass_index,
            e.trigger,
            e.viewport.height,
            e.viewport.narrow
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        log::trace!(
            "pass {} reveal {:?}#{} top={:.1} line={:.1} delay={:.2}s",
            e.pass_index,
            e.group,
            e.position,
            e.top,
            e.line,
            e.delay
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        log::debug!(
            "pass {} end fade={} slide={} skipped={}",
            e.pass_index,
            e.fade_revealed,
            e.slide_revealed,
            e.skipped
        );
    }

    fn on_section_toggle(&mut self, e: &SectionToggleEvent) {
        log::debug!("watched section entered={}", e.entered);
    }
}

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

    /// Emits a [`ClassifiedEvent`].
    #[inline]
    pub fn classified(&mut self, e: &ClassifiedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_classified(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassEndEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SectionToggleEvent`].
    #[inline]
    pub fn section_toggle(&mut self, e: &SectionToggleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_section_toggle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
