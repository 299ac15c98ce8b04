// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element queries.

use alloc::vec::Vec;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

use reveal_core::page::Page;

/// A [`Page`] over the live document.
///
/// Invalid selectors behave like selectors that match nothing.
#[derive(Clone, Debug)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    /// Wraps `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn elements(list: Option<NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Page for DomPage {
    type Element = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector).ok())
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Vec<Element> {
        elements(parent.query_selector_all(selector).ok())
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }
}
