// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for reveal.
//!
//! This crate implements the `reveal_core` seams over browser APIs:
//!
//! - [`DomPage`]: selector queries against the live document
//! - [`WindowGeometry`]: `getBoundingClientRect` and `matchMedia`
//! - [`GsapEngine`]: the page's global `gsap` object
//! - [`WebHost`]: passive listeners, coalesced to one run per animation frame
//! - [`when_ready`]: the `load` → Webflow → frame → delay startup chain
//!
//! [`install`] wires all of them together.

#![no_std]

extern crate alloc;

mod geometry;
mod gsap;
mod host;
mod page;
mod raf;
mod ready;

use alloc::boxed::Box;

use wasm_bindgen::JsValue;

pub use geometry::WindowGeometry;
pub use gsap::GsapEngine;
pub use host::{EventListener, WebHost};
pub use page::DomPage;
pub use ready::when_ready;
pub use reveal_core::orchestrator::Orchestration;

use reveal_core::config::RevealConfig;
use reveal_core::orchestrator::Orchestrator;
use reveal_core::trace::TraceSink;

/// Starts the reveal loop on the current page right away.
///
/// Returns `None` (after logging why) if there is no document or setup
/// failed. In either case the page is left fully visible.
pub fn boot(
    config: RevealConfig,
    sink: Box<dyn TraceSink>,
) -> Option<Orchestration<EventListener>> {
    let Some(window) = web_sys::window() else {
        log::warn!("reveal: no window");
        return None;
    };
    let Some(document) = window.document() else {
        log::warn!("reveal: no document");
        return None;
    };

    let geometry = WindowGeometry::new(
        window.clone(),
        config.narrow_media_query(),
        config.narrow_max_width,
    );
    let mut host = WebHost::new(window, document.clone());
    Orchestrator::run(
        DomPage::new(document),
        geometry,
        GsapEngine::global(),
        &mut host,
        config,
        sink,
    )
}

/// Boots once the page is ready and hands the running loop to `keep`.
///
/// Listeners live as long as the [`Orchestration`] does; pass
/// [`core::mem::forget`] to keep them for the page lifetime.
pub fn install(
    config: RevealConfig,
    sink: Box<dyn TraceSink>,
    keep: impl FnOnce(Orchestration<EventListener>) + 'static,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let delay_ms = config.startup_delay_ms;
    when_ready(&window, delay_ms, move || {
        if let Some(orchestration) = boot(config, sink) {
            keep(orchestration);
        }
    })
}
