// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout queries against the browser window.

use alloc::string::String;

use kurbo::Rect;
use web_sys::{Element, Window};

use reveal_core::geometry::GeometryProvider;

/// A [`GeometryProvider`] backed by `getBoundingClientRect` and
/// `window.matchMedia`.
#[derive(Clone, Debug)]
pub struct WindowGeometry {
    window: Window,
    narrow_query: String,
    narrow_max_width: f64,
}

impl WindowGeometry {
    /// Creates a provider that reports a narrow viewport while
    /// `narrow_query` matches.
    ///
    /// `narrow_max_width` is only consulted if the media query cannot be
    /// evaluated.
    #[must_use]
    pub fn new(window: Window, narrow_query: String, narrow_max_width: f64) -> Self {
        Self {
            window,
            narrow_query,
            narrow_max_width,
        }
    }
}

impl GeometryProvider<Element> for WindowGeometry {
    fn bounding_box(&self, element: &Element) -> Option<Rect> {
        if !element.is_connected() {
            return None;
        }
        let r = element.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn is_narrow_viewport(&self) -> bool {
        match self.window.match_media(&self.narrow_query) {
            Ok(Some(list)) => list.matches(),
            _ => self
                .window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .is_some_and(|w| w <= self.narrow_max_width),
        }
    }
}
