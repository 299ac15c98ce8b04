// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Homepage scroll reveals.
//!
//! Loads after GSAP and the Webflow runtime. Hides the homepage's animated
//! blocks, reveals them as they scroll into view, and cross-fades the page
//! background while the works section is on screen.
//!
//! Build with: `wasm-pack build --target web demos/homepage`

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use wasm_bindgen::prelude::*;

use reveal_core::config::RevealConfig;
use reveal_core::trace::LogSink;

/// Entry point for the homepage.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);

    reveal_backend_web::install(
        RevealConfig::default(),
        Box::new(LogSink),
        core::mem::forget,
    )
}
