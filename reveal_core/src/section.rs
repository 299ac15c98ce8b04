// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background cross-fade for the watched section.
//!
//! [`SectionColorToggle`] tracks whether the watched section straddles a fixed
//! horizontal line and animates the page background only when that answer
//! changes. Scroll events arriving while the answer is stable issue nothing.

use crate::config::RevealConfig;
use crate::geometry::{GeometryProvider, ViewportState};
use crate::page::Page;
use crate::tween::{TweenEngine, TweenVars};

/// Direction of a section transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionChange {
    /// The section now straddles the line; the alternate background applies.
    Entered,
    /// The section no longer straddles the line; the default background applies.
    Left,
}

/// Watches one section and toggles the page background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionColorToggle {
    in_watched_section: bool,
}

impl SectionColorToggle {
    /// Creates a toggle in the "outside" state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while the watched section straddles the line.
    #[must_use]
    pub fn in_watched_section(&self) -> bool {
        self.in_watched_section
    }

    /// Handles one scroll event.
    ///
    /// Returns the transition started, if any. A missing or detached section
    /// leaves the state untouched.
    pub fn on_scroll<P, G, T>(
        &mut self,
        config: &RevealConfig,
        page: &P,
        geometry: &G,
        engine: &mut T,
    ) -> Option<SectionChange>
    where
        P: Page + ?Sized,
        G: GeometryProvider<P::Element> + ?Sized,
        T: TweenEngine<P::Element> + ?Sized,
    {
        let section = page.query(&config.section.watched)?;
        let bounds = geometry.bounding_box(&section)?;
        let viewport = ViewportState::sample::<P::Element, G>(geometry);
        let line = viewport.line(config.thresholds.section_line);
        let inside = bounds.y0 <= line && bounds.y1 >= line;
        if inside == self.in_watched_section {
            return None;
        }

        if let Some(body) = page.body() {
            let color = if inside {
                config.section.alternate_background.as_str()
            } else {
                ""
            };
            let vars = TweenVars::new()
                .background_color(color)
                .duration(config.timings.section)
                .ease(config.eases.section);
            engine.animate(core::slice::from_ref(&body), &vars, None);
        }
        self.in_watched_section = inside;

        Some(if inside {
            SectionChange::Entered
        } else {
            SectionChange::Left
        })
    }
}
