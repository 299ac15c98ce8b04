// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-ready startup chain.
//!
//! Startup waits for, in order: the window `load` event, the Webflow ready
//! queue, the next animation frame, and a short grace delay. By then the page
//! framework has finished its own layout work and measurements are stable.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Window};

use crate::raf::request_animation_frame;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;
}

/// Runs `start` once the page is ready.
///
/// If the `load` event has already fired, the chain starts immediately.
pub fn when_ready(
    window: &Window,
    delay_ms: u32,
    start: impl FnOnce() + 'static,
) -> Result<(), JsValue> {
    let after_framework = move || {
        let after_frame = move |_timestamp_ms: f64| {
            let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            set_timeout(&Closure::once_into_js(start), delay);
        };
        request_animation_frame(&Closure::once_into_js(after_frame));
    };
    let on_load = move || {
        if let Err(err) = push_framework_ready(after_framework) {
            log::warn!("could not queue startup: {err:?}");
        }
    };

    let loaded = window
        .document()
        .is_some_and(|d| d.ready_state() == "complete");
    if loaded {
        on_load();
        return Ok(());
    }

    let options = AddEventListenerOptions::new();
    options.set_once(true);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "load",
        Closure::once_into_js(on_load).unchecked_ref(),
        &options,
    )
}

/// Queues `f` on `window.Webflow`, creating the queue if the framework has not
/// loaded yet. Once loaded, the framework drains the queue and runs later
/// pushes immediately.
fn push_framework_ready(f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let global = js_sys::global();
    let key = JsValue::from_str("Webflow");
    let mut queue = Reflect::get(&global, &key)?;
    if queue.is_undefined() || queue.is_null() {
        queue = Array::new().into();
        Reflect::set(&global, &key, &queue)?;
    }
    let push: Function = Reflect::get(&queue, &JsValue::from_str("push"))?.dyn_into()?;
    push.call1(&queue, &Closure::once_into_js(f))?;
    Ok(())
}
