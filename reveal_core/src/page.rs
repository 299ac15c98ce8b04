// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document queries.
//!
//! The core never touches a DOM directly. A [`Page`] answers selector queries
//! and hands out element handles; the web backend implements it over
//! `web_sys::Document`, tests implement it over an in-memory tree.

use alloc::vec::Vec;

/// Read-only access to the live document.
///
/// Queries return elements in document order. A selector that matches nothing
/// yields an empty result, never an error.
pub trait Page {
    /// Handle to one element. Cloning a handle must not clone the element.
    type Element: Clone + PartialEq + 'static;

    /// Returns every element matching `selector`.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Returns the first element matching `selector`, if any.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// Returns every descendant of `parent` matching `selector`.
    fn query_within(&self, parent: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// Returns the element whose background the section toggle animates.
    fn body(&self) -> Option<Self::Element>;
}
