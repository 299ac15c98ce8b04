// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Startup sequencing and listener registration.
//!
//! [`Orchestrator::start`] wires the pieces together in a fixed order:
//!
//! 1. Verify the tween engine is available.
//! 2. Classify page elements.
//! 3. Hide them.
//! 4. Register the evaluator for scroll and resize.
//! 5. Register the section toggle for scroll.
//! 6. Run one evaluation pass so content already on screen reveals.
//!
//! [`Orchestrator::run`] does the same but logs failures instead of returning
//! them, so the host page is never affected by a failed setup.
//!
//! The returned [`Orchestration`] owns the listener handles. Dropping it
//! unregisters them; keep it alive for as long as the page should animate.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::classify::{Classification, classify};
use crate::config::RevealConfig;
use crate::evaluate::{PassReport, RevealEvaluator};
use crate::geometry::{GeometryProvider, ViewportState};
use crate::initial::apply_initial_states;
use crate::page::Page;
use crate::section::{SectionChange, SectionColorToggle};
use crate::trace::{
    ClassifiedEvent, PassBeginEvent, PassEndEvent, SectionToggleEvent, TraceSink, Tracer, Trigger,
};
use crate::tween::{TweenEngine, TweenVars};

/// Reads the host clock, in milliseconds.
pub type Clock = fn() -> f64;

/// Why setup did not complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    /// The tween engine is not loaded. Nothing was hidden.
    MissingTweenEngine,
    /// The host refused a listener registration.
    Listener(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTweenEngine => f.write_str("tween engine not loaded; animations disabled"),
            Self::Listener(reason) => write!(f, "failed to register listener: {reason}"),
        }
    }
}

impl core::error::Error for SetupError {}

/// An event source the orchestrator listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSource<'a> {
    /// `scroll` events on the element matching `container`.
    Scroll {
        /// Selector of the scrolling container.
        container: &'a str,
    },
    /// `resize` events on the viewport.
    Resize,
}

/// Host page lifecycle surface.
pub trait Host {
    /// Registration handle. Dropping it unregisters the handler.
    type Listener;

    /// Returns the clock used to timestamp trace events.
    fn clock(&self) -> Clock;

    /// Registers `handler` for `source`.
    ///
    /// Returns `Ok(None)` if the source does not exist on this page (for
    /// example, no scrolling container); that is not an error.
    fn listen(
        &mut self,
        source: EventSource<'_>,
        handler: Box<dyn FnMut()>,
    ) -> Result<Option<Self::Listener>, SetupError>;
}

/// Entry points for starting the reveal loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orchestrator;

impl Orchestrator {
    /// Runs the startup sequence.
    ///
    /// On [`SetupError::MissingTweenEngine`] nothing has been touched. On a
    /// listener failure, elements hidden so far are restored to their visible
    /// state before the error is returned.
    pub fn start<P, G, T, H>(
        page: P,
        geometry: G,
        mut engine: T,
        host: &mut H,
        config: RevealConfig,
        sink: Box<dyn TraceSink>,
    ) -> Result<Orchestration<H::Listener>, SetupError>
    where
        P: Page + Clone + 'static,
        G: GeometryProvider<P::Element> + 'static,
        T: TweenEngine<P::Element> + 'static,
        H: Host + ?Sized,
    {
        if !engine.is_available() {
            return Err(SetupError::MissingTweenEngine);
        }

        if config.reset_background
            && let Some(body) = page.body()
        {
            engine.set(&[body], &TweenVars::new().background_color(""));
        }

        let classification = classify(&page, &config);
        apply_initial_states(&classification, &page, &mut engine, &config);

        let state = Rc::new(State {
            clock: host.clock(),
            config,
            page,
            geometry,
            engine: RefCell::new(engine),
            classification,
            toggle: RefCell::new(SectionColorToggle::new()),
            sink: RefCell::new(sink),
            passes: Cell::new(0),
        });
        state.trace_classified();

        let listeners = match register(&state, host) {
            Ok(listeners) => listeners,
            Err(err) => {
                state.restore_visibility();
                return Err(err);
            }
        };

        state.reveal(Trigger::Startup);

        Ok(Orchestration {
            listeners,
            driver: state,
        })
    }

    /// Runs the startup sequence, logging instead of returning failures.
    pub fn run<P, G, T, H>(
        page: P,
        geometry: G,
        engine: T,
        host: &mut H,
        config: RevealConfig,
        sink: Box<dyn TraceSink>,
    ) -> Option<Orchestration<H::Listener>>
    where
        P: Page + Clone + 'static,
        G: GeometryProvider<P::Element> + 'static,
        T: TweenEngine<P::Element> + 'static,
        H: Host + ?Sized,
    {
        match Self::start(page, geometry, engine, host, config, sink) {
            Ok(orchestration) => {
                log::info!(
                    "reveal ready with {} listener(s)",
                    orchestration.listener_count()
                );
                Some(orchestration)
            }
            Err(err) => {
                log::warn!("reveal setup aborted: {err}");
                None
            }
        }
    }
}

fn register<P, G, T, H>(
    state: &Rc<State<P, G, T>>,
    host: &mut H,
) -> Result<Vec<H::Listener>, SetupError>
where
    P: Page + Clone + 'static,
    G: GeometryProvider<P::Element> + 'static,
    T: TweenEngine<P::Element> + 'static,
    H: Host + ?Sized,
{
    let container = state.config.section.scroll_container.clone();
    let scroll = EventSource::Scroll {
        container: &container,
    };
    let mut listeners = Vec::new();

    let s = Rc::clone(state);
    listeners.extend(host.listen(
        scroll,
        Box::new(move || {
            s.reveal(Trigger::Scroll);
        }),
    )?);

    let s = Rc::clone(state);
    listeners.extend(host.listen(
        EventSource::Resize,
        Box::new(move || {
            s.reveal(Trigger::Resize);
        }),
    )?);

    let s = Rc::clone(state);
    listeners.extend(host.listen(scroll, Box::new(move || s.toggle_section()))?);

    Ok(listeners)
}

/// A running reveal loop.
///
/// Dropping this value (or calling [`dispose`](Self::dispose)) unregisters
/// every listener.
pub struct Orchestration<L> {
    listeners: Vec<L>,
    driver: Rc<dyn Driver>,
}

impl<L> fmt::Debug for Orchestration<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestration")
            .field("listeners", &self.listeners.len())
            .field("in_watched_section", &self.driver.in_watched_section())
            .finish()
    }
}

impl<L> Orchestration<L> {
    /// Runs an evaluation pass outside of any event, e.g. after content was
    /// injected.
    pub fn refresh(&self) -> Option<PassReport> {
        self.driver.reveal(Trigger::Manual)
    }

    /// Returns `true` while the watched section straddles its line.
    #[must_use]
    pub fn in_watched_section(&self) -> bool {
        self.driver.in_watched_section()
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Unregisters every listener.
    pub fn dispose(self) {
        drop(self);
    }
}

/// Type-erased access to the running state.
trait Driver {
    fn reveal(&self, trigger: Trigger) -> Option<PassReport>;
    fn toggle_section(&self);
    fn in_watched_section(&self) -> bool;
}

struct State<P: Page, G, T> {
    clock: Clock,
    config: RevealConfig,
    page: P,
    geometry: G,
    engine: RefCell<T>,
    classification: Classification<P::Element>,
    toggle: RefCell<SectionColorToggle>,
    sink: RefCell<Box<dyn TraceSink>>,
    passes: Cell<u64>,
}

impl<P, G, T> State<P, G, T>
where
    P: Page + Clone + 'static,
    G: GeometryProvider<P::Element>,
    T: TweenEngine<P::Element>,
{
    fn trace_classified(&self) {
        let Ok(mut sink) = self.sink.try_borrow_mut() else {
            return;
        };
        Tracer::new(&mut **sink).classified(&ClassifiedEvent {
            timestamp_ms: (self.clock)(),
            fade: self.classification.fade.len(),
            normal: self.classification.normal.len(),
            fast: self.classification.fast.len(),
        });
    }

    /// Shows every classified element at once, undoing the initial state.
    fn restore_visibility(&self) {
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        let shown = TweenVars::new().opacity(1.0);
        let placed = TweenVars::new().y(0.0).opacity(1.0);
        for a in &self.classification.fade {
            engine.set(core::slice::from_ref(&a.element), &shown);
        }
        for a in self.classification.all_animated() {
            engine.set(core::slice::from_ref(&a.element), &placed);
            if a.is_accordion() {
                let children = self
                    .page
                    .query_within(&a.element, &self.config.accordion_children);
                if !children.is_empty() {
                    engine.set(&children, &placed);
                }
            }
        }
    }
}

impl<P, G, T> Driver for State<P, G, T>
where
    P: Page + Clone + 'static,
    G: GeometryProvider<P::Element>,
    T: TweenEngine<P::Element>,
{
    fn reveal(&self, trigger: Trigger) -> Option<PassReport> {
        let mut engine = self.engine.try_borrow_mut().ok()?;
        let mut sink = self.sink.try_borrow_mut().ok()?;
        let mut tracer = Tracer::new(&mut **sink);

        let pass_index = self.passes.get();
        self.passes.set(pass_index + 1);

        tracer.pass_begin(&PassBeginEvent {
            pass_index,
            trigger,
            viewport: ViewportState::sample::<P::Element, G>(&self.geometry),
            timestamp_ms: (self.clock)(),
        });
        let report = RevealEvaluator::new(&self.config).evaluate(
            &self.classification,
            &self.page,
            &self.geometry,
            &mut *engine,
            pass_index,
            &mut tracer,
        );
        tracer.pass_end(&PassEndEvent {
            pass_index,
            fade_revealed: report.fade_revealed,
            slide_revealed: report.slide_revealed,
            skipped: report.skipped,
            timestamp_ms: (self.clock)(),
        });
        Some(report)
    }

    fn toggle_section(&self) {
        let (Ok(mut engine), Ok(mut toggle)) =
            (self.engine.try_borrow_mut(), self.toggle.try_borrow_mut())
        else {
            return;
        };
        let change = toggle.on_scroll(&self.config, &self.page, &self.geometry, &mut *engine);
        if let Some(change) = change
            && let Ok(mut sink) = self.sink.try_borrow_mut()
        {
            Tracer::new(&mut **sink).section_toggle(&SectionToggleEvent {
                entered: change == SectionChange::Entered,
                timestamp_ms: (self.clock)(),
            });
        }
    }

    fn in_watched_section(&self) -> bool {
        self.toggle
            .try_borrow()
            .is_ok_and(|t| t.in_watched_section())
    }
}
