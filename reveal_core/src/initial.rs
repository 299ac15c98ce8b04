// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pre-reveal state.
//!
//! [`apply_initial_states`] hides every classified element synchronously. It
//! must run before the first evaluation pass; otherwise elements already past
//! their trigger line would flash at full opacity before being hidden.

use crate::classify::Classification;
use crate::config::RevealConfig;
use crate::page::Page;
use crate::tween::{TweenEngine, TweenVars};

/// Hides all classified elements with immediate `set` calls.
///
/// - Fade elements: opacity 0.
/// - Slide elements: opacity 0, shifted down by [`Offsets::slide`].
/// - Accordion children: opacity 0, shifted down by [`Offsets::accordion`].
///
/// [`Offsets::slide`]: crate::config::Offsets::slide
/// [`Offsets::accordion`]: crate::config::Offsets::accordion
pub fn apply_initial_states<P, T>(
    classification: &Classification<P::Element>,
    page: &P,
    engine: &mut T,
    config: &RevealConfig,
) where
    P: Page + ?Sized,
    T: TweenEngine<P::Element> + ?Sized,
{
    let fade = TweenVars::new().opacity(0.0).force_3d(config.force_3d);
    for a in &classification.fade {
        engine.set(core::slice::from_ref(&a.element), &fade);
    }

    let slide = TweenVars::new()
        .y(config.offsets.slide)
        .opacity(0.0)
        .force_3d(config.force_3d);
    let children_hidden = TweenVars::new()
        .y(config.offsets.accordion)
        .opacity(0.0)
        .force_3d(config.force_3d);
    for a in classification.all_animated() {
        engine.set(core::slice::from_ref(&a.element), &slide);
        if a.is_accordion() {
            let children = page.query_within(&a.element, &config.accordion_children);
            if !children.is_empty() {
                engine.set(&children, &children_hidden);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::classify::classify;
    use crate::testing::{Call, FakeEngine, FakePage};

    const MARKER: &str = "[data-w-id*=\"4339224\"]";

    #[test]
    fn hides_every_bucket_without_animating() {
        let mut page = FakePage::new();
        let fade = page.add(".container-small");
        let normal = page.add(".home_capbility-specific");
        let acc = page.add(".home-works_wrapper-accordion");
        let c1 = page.add_child(acc, MARKER);
        let c2 = page.add_child(acc, MARKER);
        let config = RevealConfig::default();
        let classification = classify(&page, &config);
        let mut engine = FakeEngine::new();

        apply_initial_states(&classification, &page, &mut engine, &config);

        let calls = engine.calls();
        assert!(calls.iter().all(|c| matches!(c, Call::Set { .. })));
        assert_eq!(engine.opacity(fade), Some(0.0));
        assert_eq!(engine.y(fade), None);
        for id in [normal, acc] {
            assert_eq!(engine.opacity(id), Some(0.0));
            assert_eq!(engine.y(id), Some(25.0));
        }
        for id in [c1, c2] {
            assert_eq!(engine.opacity(id), Some(0.0));
            assert_eq!(engine.y(id), Some(15.0));
        }
        // Children are hidden with one grouped call.
        assert!(calls.iter().any(|c| c.targets() == vec![c1, c2].as_slice()));
    }

    #[test]
    fn non_accordion_children_are_untouched() {
        let mut page = FakePage::new();
        let cta = page.add(".cta-box");
        let marked = page.add_child(cta, MARKER);
        let config = RevealConfig::default();
        let classification = classify(&page, &config);
        let mut engine = FakeEngine::new();

        apply_initial_states(&classification, &page, &mut engine, &config);

        assert_eq!(engine.y(cta), Some(25.0));
        assert_eq!(engine.opacity(marked), None);
    }

    #[test]
    fn empty_page_issues_nothing() {
        let page = FakePage::new();
        let config = RevealConfig::default();
        let classification = classify(&page, &config);
        let mut engine = FakeEngine::new();
        apply_initial_states(&classification, &page, &mut engine, &config);
        assert!(engine.calls().is_empty());
    }
}
