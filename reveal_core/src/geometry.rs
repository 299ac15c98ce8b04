// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport geometry.
//!
//! Layout is computed elsewhere; the core only asks for the results through
//! [`GeometryProvider`]. [`ViewportState`] is sampled at the start of every
//! pass so resizes are always reflected.

use kurbo::Rect;

/// Supplies element and viewport geometry on demand.
pub trait GeometryProvider<E> {
    /// Returns the element's viewport-relative bounding box.
    ///
    /// `y0` is the top edge and `y1` the bottom edge. Returns `None` when the
    /// element is no longer attached to the document.
    fn bounding_box(&self, element: &E) -> Option<Rect>;

    /// Returns the current viewport height in CSS pixels.
    fn viewport_height(&self) -> f64;

    /// Returns `true` if the viewport is at or below the narrow breakpoint.
    fn is_narrow_viewport(&self) -> bool;
}

/// Viewport measurements for one evaluation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Viewport height in CSS pixels.
    pub height: f64,
    /// Whether the viewport is narrow (mobile layout).
    pub narrow: bool,
}

impl ViewportState {
    /// Samples the current viewport.
    #[must_use]
    pub fn sample<E, G>(geometry: &G) -> Self
    where
        G: GeometryProvider<E> + ?Sized,
    {
        Self {
            height: geometry.viewport_height(),
            narrow: geometry.is_narrow_viewport(),
        }
    }

    /// Converts a threshold fraction into a viewport-relative y coordinate.
    #[inline]
    #[must_use]
    pub fn line(&self, fraction: f64) -> f64 {
        self.height * fraction
    }
}
