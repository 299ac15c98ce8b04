// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven reveal orchestration.
//!
//! `reveal_core` decides *which* page elements reveal, *when*, and with what
//! timing, while delegating everything platform-specific to trait seams. It is
//! `no_std` compatible (with `alloc`) and holds no global state.
//!
//! # Architecture
//!
//! Startup and event handling flow through the orchestrator:
//!
//! ```text
//!   Host "ready"
//!       │
//!       ▼
//!   Orchestrator::start()
//!       │  classify() ──► Classification
//!       │  apply_initial_states() ──► TweenEngine::set()
//!       │  Host::listen(scroll | resize)
//!       ▼
//!   RevealEvaluator::evaluate() ──► TweenEngine::animate()
//!       │                                   │ on_complete
//!       │                                   ▼
//!       │                     accordion children animate()
//!       ▼
//!   SectionColorToggle::on_scroll() ──► body background
//! ```
//!
//! **[`page`]**: The [`Page`](page::Page) trait for DOM queries.
//!
//! **[`geometry`]**: The [`GeometryProvider`](geometry::GeometryProvider)
//! trait and the per-pass [`ViewportState`](geometry::ViewportState).
//!
//! **[`tween`]**: The [`TweenEngine`](tween::TweenEngine) trait and the
//! property bag passed to it.
//!
//! **[`config`]**: Selector rules, thresholds, durations, and offsets.
//!
//! **[`classify`]**: Sorting page elements into fade, normal, and fast
//! buckets.
//!
//! **[`initial`]**: Driving classified elements to their hidden state.
//!
//! **[`evaluate`]**: Threshold checks and reveal animation requests.
//!
//! **[`section`]**: Background cross-fade for the watched section.
//!
//! **[`orchestrator`]**: Startup sequencing and listener registration.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod classify;
pub mod config;
pub mod evaluate;
pub mod geometry;
pub mod initial;
pub mod orchestrator;
pub mod page;
pub mod section;
pub mod trace;
pub mod tween;

#[cfg(test)]
mod testing;
