// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Passive scroll and resize listeners.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, EventTarget, Window};

use reveal_core::orchestrator::{Clock, EventSource, Host, SetupError};

use crate::raf::{FrameCoalescer, performance_now};

/// A registered DOM listener. Dropping it removes the listener and cancels
/// any frame it has requested.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
    frames: Rc<FrameCoalescer>,
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        self.frames.cancel();
    }
}

impl core::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventListener")
            .field("event", &self.event)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

/// The browser [`Host`].
///
/// Handlers are registered passive and run at most once per animation frame.
#[derive(Clone, Debug)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Creates a host over `window` and its `document`.
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl Host for WebHost {
    type Listener = EventListener;

    fn clock(&self) -> Clock {
        performance_now
    }

    fn listen(
        &mut self,
        source: EventSource<'_>,
        handler: Box<dyn FnMut()>,
    ) -> Result<Option<EventListener>, SetupError> {
        let (target, event): (EventTarget, _) = match source {
            EventSource::Scroll { container } => {
                match self.document.query_selector(container).ok().flatten() {
                    Some(el) => (el.into(), "scroll"),
                    None => {
                        log::debug!("no scroll container `{container}`; scroll listener skipped");
                        return Ok(None);
                    }
                }
            }
            EventSource::Resize => (self.window.clone().into(), "resize"),
        };

        let frames = Rc::new(FrameCoalescer::new(handler));
        let scheduled = Rc::clone(&frames);
        let closure = Closure::<dyn FnMut()>::new(move || scheduled.schedule());

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| SetupError::Listener(format!("{event}: {err:?}")))?;

        Ok(Some(EventListener {
            target,
            event,
            closure,
            frames,
        }))
    }
}
