// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame event coalescing.
//!
//! Scroll and resize fire far more often than the screen refreshes.
//! [`FrameCoalescer`] turns any burst of [`schedule`](FrameCoalescer::schedule)
//! calls into a single handler run on the next `requestAnimationFrame`.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings so a burst of events never looks up the Window.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    pub(crate) fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type RafClosure = Closure<dyn FnMut(f64)>;

/// Runs a handler at most once per animation frame.
pub(crate) struct FrameCoalescer {
    inner: Rc<FrameInner>,
}

struct FrameInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Created once and re-registered for every scheduled frame.
    closure: RefCell<Option<RafClosure>>,

    /// The handler run on the frame.
    handler: RefCell<Box<dyn FnMut()>>,

    /// Whether a frame is already requested.
    pending: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call.
    raf_id: Cell<i32>,
}

impl FrameCoalescer {
    pub(crate) fn new(handler: Box<dyn FnMut()>) -> Self {
        let inner = Rc::new(FrameInner {
            closure: RefCell::new(None),
            handler: RefCell::new(handler),
            pending: Cell::new(false),
            raf_id: Cell::new(0),
        });

        let frame = Rc::clone(&inner);
        let closure = Closure::wrap(Box::new(move |_timestamp_ms: f64| {
            frame.pending.set(false);
            // A handler that re-enters through a nested event is skipped.
            if let Ok(mut handler) = frame.handler.try_borrow_mut() {
                handler();
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Requests a handler run on the next frame, unless one is pending.
    pub(crate) fn schedule(&self) {
        if self.inner.pending.get() {
            return;
        }
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.raf_id.set(id);
            self.inner.pending.set(true);
        }
    }

    /// Cancels a pending run.
    pub(crate) fn cancel(&self) {
        if self.inner.pending.replace(false) {
            cancel_animation_frame(self.inner.raf_id.get());
        }
    }
}

impl Drop for FrameCoalescer {
    fn drop(&mut self) {
        self.cancel();
        // The closure holds a strong reference back to `inner`; dropping it
        // breaks the cycle.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for FrameCoalescer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameCoalescer")
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}
