// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tween engine contract.
//!
//! Interpolation happens outside this crate. The orchestrator describes target
//! values with [`TweenVars`] and hands them to a [`TweenEngine`], which
//! animates asynchronously over subsequent frames.
//!
//! Engines must supersede an in-flight animation on the same element with the
//! latest request, so re-issuing identical targets is harmless.

use alloc::boxed::Box;
use alloc::string::String;

/// Continuation run once an animation completes.
///
/// The engine passes itself back in, so the continuation can queue follow-up
/// animations without holding its own engine handle.
pub type OnComplete<E> = Box<dyn FnOnce(&mut dyn TweenEngine<E>)>;

/// Animates element properties.
pub trait TweenEngine<E> {
    /// Returns `true` if the engine can accept requests.
    ///
    /// The orchestrator refuses to hide anything when this is `false`, leaving
    /// the page in its default visible state.
    fn is_available(&self) -> bool {
        true
    }

    /// Applies `vars` immediately, with no animation.
    fn set(&mut self, targets: &[E], vars: &TweenVars);

    /// Animates `targets` toward `vars`.
    ///
    /// `on_complete`, if given, runs once after the whole animation (including
    /// any stagger) has finished.
    fn animate(&mut self, targets: &[E], vars: &TweenVars, on_complete: Option<OnComplete<E>>);
}

/// Easing curve identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Quadratic ease-out.
    Power1Out,
    /// Cubic ease-out.
    Power2Out,
}

impl Ease {
    /// Returns the engine-facing curve name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Power1Out => "power1.out",
            Self::Power2Out => "power2.out",
        }
    }
}

/// Target values and timing for one `set` or `animate` request.
///
/// Unset properties are left untouched by the engine. Times are in seconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TweenVars {
    /// Target opacity.
    pub opacity: Option<f64>,
    /// Target vertical offset in CSS pixels.
    pub y: Option<f64>,
    /// Target background color. An empty string clears the inline value.
    pub background_color: Option<String>,
    /// Animation duration.
    pub duration: f64,
    /// Delay before the animation starts.
    pub delay: f64,
    /// Easing curve; `None` uses the engine default.
    pub ease: Option<Ease>,
    /// Delay between consecutive targets.
    pub stagger: f64,
    /// Promote targets to their own compositing layer.
    pub force_3d: bool,
}

impl TweenVars {
    /// Creates an empty property bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets the target vertical offset.
    #[must_use]
    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Sets the target background color.
    #[must_use]
    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Sets the start delay.
    #[must_use]
    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    /// Sets the easing curve.
    #[must_use]
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Sets the per-target stagger.
    #[must_use]
    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = seconds;
        self
    }

    /// Sets the compositing hint.
    #[must_use]
    pub fn force_3d(mut self, force_3d: bool) -> Self {
        self.force_3d = force_3d;
        self
    }
}
