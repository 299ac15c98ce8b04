// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element classification.
//!
//! [`classify`] runs every [`SelectorRule`](crate::config::SelectorRule) once
//! and sorts the matches into three buckets. Rules are applied in order and an
//! element claimed by an earlier rule is never added again, so each element
//! belongs to exactly one bucket.

use alloc::vec::Vec;

use crate::config::RevealConfig;
use crate::page::Page;

/// Animation bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Opacity-only reveal.
    Fade,
    /// Slide-and-fade reveal at the normal speed.
    Normal,
    /// Slide-and-fade reveal at the fast speed.
    Fast,
}

/// Structural variant of a slide element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// No special handling.
    #[default]
    Plain,
    /// Container whose marked children reveal after it does.
    Accordion,
    /// Call-to-action box; uses the emphasis threshold.
    Cta,
}

/// One classified element.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedElement<E> {
    /// Handle to the element.
    pub element: E,
    /// Bucket the element belongs to.
    pub bucket: Bucket,
    /// Structural variant.
    pub variant: Variant,
}

impl<E> AnimatedElement<E> {
    /// Returns `true` for accordion containers.
    #[inline]
    #[must_use]
    pub fn is_accordion(&self) -> bool {
        self.variant == Variant::Accordion
    }
}

/// Classified elements, each bucket in document-query order.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification<E> {
    /// Opacity-only elements.
    pub fade: Vec<AnimatedElement<E>>,
    /// Normal-speed slide elements.
    pub normal: Vec<AnimatedElement<E>>,
    /// Fast slide elements.
    pub fast: Vec<AnimatedElement<E>>,
}

impl<E> Default for Classification<E> {
    fn default() -> Self {
        Self {
            fade: Vec::new(),
            normal: Vec::new(),
            fast: Vec::new(),
        }
    }
}

impl<E> Classification<E> {
    /// Returns every slide element: normal first, then fast.
    pub fn all_animated(&self) -> impl Iterator<Item = &AnimatedElement<E>> + '_ {
        self.normal.iter().chain(self.fast.iter())
    }

    /// Returns the number of classified elements across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fade.len() + self.normal.len() + self.fast.len()
    }

    /// Returns `true` if nothing was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Linear in the number of classified elements. Handles are only
    // `PartialEq`, and a page holds a few dozen of them.
    fn contains(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.fade
            .iter()
            .chain(self.all_animated())
            .any(|a| a.element == *element)
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<AnimatedElement<E>> {
        match bucket {
            Bucket::Fade => &mut self.fade,
            Bucket::Normal => &mut self.normal,
            Bucket::Fast => &mut self.fast,
        }
    }
}

/// Sorts page elements into buckets.
///
/// Elements matching no rule are left out. A rule matching nothing
/// contributes nothing.
pub fn classify<P: Page + ?Sized>(page: &P, config: &RevealConfig) -> Classification<P::Element> {
    let mut out = Classification::default();
    for rule in &config.selectors {
        for element in page.query_all(&rule.selector) {
            if out.contains(&element) {
                continue;
            }
            out.bucket_mut(rule.bucket).push(AnimatedElement {
                element,
                bucket: rule.bucket,
                variant: rule.variant,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::config::SelectorRule;
    use crate::testing::FakePage;

    fn ids(list: &[AnimatedElement<u32>]) -> Vec<u32> {
        list.iter().map(|a| a.element).collect()
    }

    #[test]
    fn buckets_follow_rule_order() {
        let mut page = FakePage::new();
        let shout = page.add(".home-shoutouts_top-illustration");
        let small_a = page.add(".container-small");
        let cap = page.add(".home_capbility-specific");
        let cta = page.add(".cta-box");
        let acc = page.add(".home-works_wrapper-accordion");
        let small_b = page.add(".container-small");

        let c = classify(&page, &RevealConfig::default());

        assert_eq!(ids(&c.fade), vec![shout, small_a, small_b]);
        assert_eq!(ids(&c.normal), vec![cap]);
        // Fast follows rule order (accordion rule precedes cta rule).
        assert_eq!(ids(&c.fast), vec![acc, cta]);
        assert_eq!(c.fast[0].variant, Variant::Accordion);
        assert_eq!(c.fast[1].variant, Variant::Cta);

        let all: Vec<u32> = c.all_animated().map(|a| a.element).collect();
        assert_eq!(all, vec![cap, acc, cta]);
    }

    #[test]
    fn unmatched_elements_are_excluded() {
        let mut page = FakePage::new();
        page.add(".footer");
        let c = classify(&page, &RevealConfig::default());
        assert!(c.is_empty());
    }

    #[test]
    fn first_matching_rule_claims_the_element() {
        let mut page = FakePage::new();
        let both = page.add_with_classes(&[".container-small", ".cta-box"]);

        let c = classify(&page, &RevealConfig::default());

        assert_eq!(ids(&c.fade), vec![both]);
        assert!(c.fast.is_empty());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn custom_rules_are_honored() {
        let mut page = FakePage::new();
        let hero = page.add(".hero");
        let config = RevealConfig {
            selectors: vec![SelectorRule::new(".hero", Bucket::Normal)],
            ..RevealConfig::default()
        };
        let c = classify(&page, &config);
        assert_eq!(ids(&c.normal), vec![hero]);
        assert_eq!(c.normal[0].bucket, Bucket::Normal);
    }
}
