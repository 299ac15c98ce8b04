// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal configuration.
//!
//! Every selector, threshold, duration, and offset the orchestrator uses lives
//! in [`RevealConfig`]. [`RevealConfig::default`] reproduces the homepage
//! layout; other pages can supply their own rules.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::classify::{Bucket, Variant};
use crate::tween::Ease;

/// Maps one structural selector to a bucket and variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorRule {
    /// CSS selector, queried against the whole document.
    pub selector: String,
    /// Bucket that matched elements join.
    pub bucket: Bucket,
    /// Structural variant of matched elements.
    pub variant: Variant,
}

impl SelectorRule {
    /// Creates a rule for a [`Variant::Plain`] element.
    #[must_use]
    pub fn new(selector: &str, bucket: Bucket) -> Self {
        Self {
            selector: selector.into(),
            bucket,
            variant: Variant::Plain,
        }
    }

    /// Returns this rule with a different variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

/// Trigger lines, expressed as fractions of the viewport height.
///
/// An element becomes eligible for reveal once its top edge is at or above
/// `fraction × viewport_height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Fade elements on wide viewports.
    pub fade_wide: f64,
    /// Fade elements on narrow viewports.
    pub fade_narrow: f64,
    /// Plain slide elements.
    pub slide: f64,
    /// Accordion and call-to-action slide elements.
    pub slide_emphasis: f64,
    /// Horizontal line the watched section must straddle.
    pub section_line: f64,
}

impl Thresholds {
    /// Returns the trigger fraction for an element.
    ///
    /// This is a pure function of its inputs; nothing mutates thresholds at
    /// runtime.
    #[must_use]
    pub fn fraction(&self, bucket: Bucket, variant: Variant, narrow: bool) -> f64 {
        match bucket {
            Bucket::Fade if narrow => self.fade_narrow,
            Bucket::Fade => self.fade_wide,
            Bucket::Normal | Bucket::Fast => match variant {
                Variant::Accordion | Variant::Cta => self.slide_emphasis,
                Variant::Plain => self.slide,
            },
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fade_wide: 0.95,
            fade_narrow: 0.55,
            slide: 0.9,
            slide_emphasis: 0.95,
            section_line: 0.4,
        }
    }
}

/// Durations and delays, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timings {
    /// Fade reveal duration.
    pub fade: f64,
    /// Slide reveal duration for the normal bucket.
    pub normal: f64,
    /// Slide reveal duration for the fast bucket.
    pub fast: f64,
    /// Per-element delay increment on wide viewports.
    pub stagger: f64,
    /// Delay added to every slide reveal.
    pub slide_base_delay: f64,
    /// Accordion child reveal duration.
    pub accordion: f64,
    /// Delay between consecutive accordion children on wide viewports.
    pub accordion_stagger: f64,
    /// Background cross-fade duration.
    pub section: f64,
}

impl Timings {
    /// Returns the per-element stagger delay for position `index`.
    ///
    /// Narrow viewports reveal everything at once.
    #[must_use]
    pub fn stagger_delay(&self, index: usize, narrow: bool) -> f64 {
        if narrow {
            0.0
        } else {
            index as f64 * self.stagger
        }
    }

    /// Returns the slide duration for a bucket.
    #[must_use]
    pub fn slide_duration(&self, bucket: Bucket) -> f64 {
        if bucket == Bucket::Fast {
            self.fast
        } else {
            self.normal
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            fade: 0.5,
            normal: 0.3,
            fast: 0.15,
            stagger: 0.02,
            slide_base_delay: 0.5,
            accordion: 0.15,
            accordion_stagger: 0.03,
            section: 0.3,
        }
    }
}

/// Vertical offsets of the hidden state, in CSS pixels below the final
/// position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offsets {
    /// Slide elements.
    pub slide: f64,
    /// Accordion children.
    pub accordion: f64,
}

impl Default for Offsets {
    fn default() -> Self {
        Self {
            slide: 25.0,
            accordion: 15.0,
        }
    }
}

/// Easing curves per animation group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eases {
    /// Fade reveals.
    pub fade: Ease,
    /// Slide reveals and accordion children.
    pub slide: Ease,
    /// Background cross-fade.
    pub section: Ease,
}

impl Default for Eases {
    fn default() -> Self {
        Self {
            fade: Ease::Power1Out,
            slide: Ease::Power2Out,
            section: Ease::Power2Out,
        }
    }
}

/// The watched section and its scroll source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionConfig {
    /// Scrolling container whose `scroll` events drive everything.
    pub scroll_container: String,
    /// Section whose overlap with the trigger line toggles the background.
    pub watched: String,
    /// Background value applied while the section is in view.
    pub alternate_background: String,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            scroll_container: ".section-scrolling-wrapper".into(),
            watched: ".section_home-works".into(),
            alternate_background: "var(--background-alternate)".into(),
        }
    }
}

/// Complete orchestrator configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Ordered classification rules. Earlier rules claim elements first.
    pub selectors: Vec<SelectorRule>,
    /// Marker selector for accordion children, queried inside the container.
    pub accordion_children: String,
    /// Trigger lines.
    pub thresholds: Thresholds,
    /// Durations and delays.
    pub timings: Timings,
    /// Hidden-state offsets.
    pub offsets: Offsets,
    /// Easing curves.
    pub eases: Eases,
    /// Watched section settings.
    pub section: SectionConfig,
    /// Widest viewport, in CSS pixels, still considered narrow.
    pub narrow_max_width: f64,
    /// Grace delay before the first pass, letting the page finish layout.
    pub startup_delay_ms: u32,
    /// Ask the tween engine to promote animated elements to their own layer.
    pub force_3d: bool,
    /// Clear any inline page background before the first pass.
    pub reset_background: bool,
}

impl RevealConfig {
    /// Returns the media query matching narrow viewports.
    #[must_use]
    pub fn narrow_media_query(&self) -> String {
        alloc::format!("(max-width: {}px)", self.narrow_max_width)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: vec![
                SelectorRule::new(".home-shoutouts_top-illustration", Bucket::Fade),
                SelectorRule::new(".home-work_top-illustration", Bucket::Fade),
                SelectorRule::new(".home-services_top-illustration", Bucket::Fade),
                SelectorRule::new(".container-small", Bucket::Fade),
                SelectorRule::new(".home_capbility-specific", Bucket::Normal),
                SelectorRule::new(".home-works_wrapper-container", Bucket::Fast),
                SelectorRule::new(".home-works_wrapper-accordion", Bucket::Fast)
                    .with_variant(Variant::Accordion),
                SelectorRule::new(".customer-testimonal--1", Bucket::Fast),
                SelectorRule::new(".cta-box", Bucket::Fast).with_variant(Variant::Cta),
            ],
            accordion_children: "[data-w-id*=\"4339224\"]".into(),
            thresholds: Thresholds::default(),
            timings: Timings::default(),
            offsets: Offsets::default(),
            eases: Eases::default(),
            section: SectionConfig::default(),
            narrow_max_width: 767.0,
            startup_delay_ms: 100,
            force_3d: true,
            reset_background: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_threshold_depends_on_width() {
        let t = Thresholds::default();
        assert_eq!(t.fraction(Bucket::Fade, Variant::Plain, false), 0.95);
        assert_eq!(t.fraction(Bucket::Fade, Variant::Plain, true), 0.55);
    }

    #[test]
    fn slide_threshold_depends_on_variant_only() {
        let t = Thresholds::default();
        for narrow in [false, true] {
            assert_eq!(t.fraction(Bucket::Normal, Variant::Plain, narrow), 0.9);
            assert_eq!(t.fraction(Bucket::Fast, Variant::Plain, narrow), 0.9);
            assert_eq!(t.fraction(Bucket::Fast, Variant::Accordion, narrow), 0.95);
            assert_eq!(t.fraction(Bucket::Fast, Variant::Cta, narrow), 0.95);
        }
    }

    #[test]
    fn stagger_collapses_on_narrow() {
        let t = Timings::default();
        assert!((t.stagger_delay(3, false) - 0.06).abs() < 1e-12);
        assert_eq!(t.stagger_delay(3, true), 0.0);
    }

    #[test]
    fn fast_bucket_is_quicker() {
        let t = Timings::default();
        assert!(t.slide_duration(Bucket::Fast) < t.slide_duration(Bucket::Normal));
    }

    #[test]
    fn default_rules_are_in_document_order() {
        let config = RevealConfig::default();
        let buckets: Vec<Bucket> = config.selectors.iter().map(|r| r.bucket).collect();
        assert_eq!(buckets[..4], [Bucket::Fade; 4]);
        assert_eq!(buckets[4], Bucket::Normal);
        assert_eq!(buckets[5..], [Bucket::Fast; 4]);
        assert_eq!(config.narrow_media_query(), "(max-width: 767px)");
    }
}
