// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal evaluation.
//!
//! [`RevealEvaluator::evaluate`] is invoked on every scroll and resize, and once
//! at startup. Each pass samples the viewport, checks every classified element
//! against its trigger line, and requests reveal animations for those past it.
//!
//! The evaluator keeps no state between passes. An element already revealed is
//! simply asked for the same targets again; the tween engine supersedes the
//! in-flight animation, so the end state is unchanged.
//!
//! Accordion containers chain a second phase: their marked children animate
//! from the container's completion callback, never before it.

use alloc::boxed::Box;
use alloc::string::String;

use crate::classify::{AnimatedElement, Classification};
use crate::config::RevealConfig;
use crate::geometry::{GeometryProvider, ViewportState};
use crate::page::Page;
use crate::trace::{RevealEvent, RevealGroup, Tracer};
use crate::tween::{OnComplete, TweenEngine, TweenVars};

/// Outcome of one evaluation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassReport {
    /// Viewport sampled for this pass.
    pub viewport: ViewportState,
    /// Fade reveals requested.
    pub fade_revealed: usize,
    /// Slide reveals requested.
    pub slide_revealed: usize,
    /// Elements skipped because they had no geometry.
    pub skipped: usize,
}

/// Issues reveal animations for elements past their trigger line.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvaluator<'a> {
    config: &'a RevealConfig,
}

impl<'a> RevealEvaluator<'a> {
    /// Creates an evaluator over `config`.
    #[must_use]
    pub fn new(config: &'a RevealConfig) -> Self {
        Self { config }
    }

    /// Runs one pass.
    ///
    /// Elements are visited in classification order: fade elements first, then
    /// normal and fast slide elements. Position within each group sets the
    /// stagger delay.
    pub fn evaluate<P, G, T>(
        &self,
        classification: &Classification<P::Element>,
        page: &P,
        geometry: &G,
        engine: &mut T,
        pass_index: u64,
        tracer: &mut Tracer<'_>,
    ) -> PassReport
    where
        P: Page + Clone + 'static,
        G: GeometryProvider<P::Element> + ?Sized,
        T: TweenEngine<P::Element> + ?Sized,
    {
        let viewport = ViewportState::sample::<P::Element, G>(geometry);
        let mut report = PassReport {
            viewport,
            fade_revealed: 0,
            slide_revealed: 0,
            skipped: 0,
        };

        let thresholds = &self.config.thresholds;
        let timings = &self.config.timings;

        for (index, a) in classification.fade.iter().enumerate() {
            let Some(bounds) = geometry.bounding_box(&a.element) else {
                report.skipped += 1;
                continue;
            };
            let line = viewport.line(thresholds.fraction(a.bucket, a.variant, viewport.narrow));
            if bounds.y0 > line {
                continue;
            }
            let vars = TweenVars::new()
                .opacity(1.0)
                .duration(timings.fade)
                .delay(timings.stagger_delay(index, viewport.narrow))
                .ease(self.config.eases.fade)
                .force_3d(self.config.force_3d);
            engine.animate(core::slice::from_ref(&a.element), &vars, None);
            report.fade_revealed += 1;
            tracer.reveal(&RevealEvent {
                pass_index,
                group: RevealGroup::Fade,
                position: index,
                top: bounds.y0,
                line,
                delay: vars.delay,
                duration: vars.duration,
                chained: false,
            });
        }

        for (index, a) in classification.all_animated().enumerate() {
            let Some(bounds) = geometry.bounding_box(&a.element) else {
                report.skipped += 1;
                continue;
            };
            let line = viewport.line(thresholds.fraction(a.bucket, a.variant, viewport.narrow));
            if bounds.y0 > line {
                continue;
            }
            let vars = TweenVars::new()
                .y(0.0)
                .opacity(1.0)
                .duration(timings.slide_duration(a.bucket))
                .delay(timings.stagger_delay(index, viewport.narrow) + timings.slide_base_delay)
                .ease(self.config.eases.slide)
                .force_3d(self.config.force_3d);
            let chain = a
                .is_accordion()
                .then(|| self.reveal_children(page, a, viewport.narrow));
            let chained = chain.is_some();
            engine.animate(core::slice::from_ref(&a.element), &vars, chain);
            report.slide_revealed += 1;
            tracer.reveal(&RevealEvent {
                pass_index,
                group: RevealGroup::Slide,
                position: index,
                top: bounds.y0,
                line,
                delay: vars.delay,
                duration: vars.duration,
                chained,
            });
        }

        report
    }

    /// Builds the continuation that reveals an accordion's children.
    ///
    /// Children are looked up when the container finishes, so markup changes
    /// in between are picked up.
    fn reveal_children<P>(
        &self,
        page: &P,
        container: &AnimatedElement<P::Element>,
        narrow: bool,
    ) -> OnComplete<P::Element>
    where
        P: Page + Clone + 'static,
    {
        let page = page.clone();
        let parent = container.element.clone();
        let selector: String = self.config.accordion_children.clone();
        let stagger = if narrow {
            0.0
        } else {
            self.config.timings.accordion_stagger
        };
        let vars = TweenVars::new()
            .y(0.0)
            .opacity(1.0)
            .duration(self.config.timings.accordion)
            .stagger(stagger)
            .ease(self.config.eases.slide)
            .force_3d(self.config.force_3d);

        Box::new(move |engine: &mut dyn TweenEngine<P::Element>| {
            let children = page.query_within(&parent, &selector);
            if !children.is_empty() {
                engine.animate(&children, &vars, None);
            }
        })
    }
}
