// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge to the page's global `gsap` object.
//!
//! [`GsapEngine`] translates [`TweenVars`] into a plain vars object and calls
//! `gsap.set` or `gsap.to` through reflection, so no bindings to the library
//! have to be generated. Completion callbacks become one-shot closures that
//! the JS side owns once passed in.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use reveal_core::tween::{OnComplete, TweenEngine, TweenVars};

/// A [`TweenEngine`] over `window.gsap`.
#[derive(Clone, Debug)]
pub struct GsapEngine {
    gsap: Option<Object>,
}

impl GsapEngine {
    /// Looks up the global `gsap` object.
    ///
    /// The engine reports itself unavailable if the library has not loaded.
    #[must_use]
    pub fn global() -> Self {
        let gsap = Reflect::get(&js_sys::global(), &JsValue::from_str("gsap"))
            .ok()
            .and_then(|v| v.dyn_into::<Object>().ok());
        Self { gsap }
    }

    fn call(&self, method: &str, targets: &[Element], vars: &Object) {
        let Some(gsap) = &self.gsap else {
            return;
        };
        let result = Reflect::get(gsap, &JsValue::from_str(method))
            .and_then(JsCast::dyn_into::<Function>)
            .and_then(|f| f.call2(gsap, &target_array(targets), vars));
        if let Err(err) = result {
            log::warn!("gsap.{method} failed: {err:?}");
        }
    }
}

fn target_array(targets: &[Element]) -> Array {
    targets.iter().collect()
}

fn put(vars: &Object, key: &str, value: &JsValue) {
    // Setting a property on a fresh plain object cannot fail.
    let _ = Reflect::set(vars, &JsValue::from_str(key), value);
}

/// Builds the vars object shared by `set` and `to`.
fn vars_object(vars: &TweenVars, animated: bool) -> Object {
    let obj = Object::new();
    if let Some(opacity) = vars.opacity {
        put(&obj, "opacity", &JsValue::from_f64(opacity));
    }
    if let Some(y) = vars.y {
        put(&obj, "y", &JsValue::from_f64(y));
    }
    if let Some(color) = &vars.background_color {
        put(&obj, "backgroundColor", &JsValue::from_str(color));
    }
    if animated {
        // Kill the overlapping properties of any running tween on the same
        // targets, along with its pending `onComplete`.
        put(&obj, "overwrite", &JsValue::from_str("auto"));
        put(&obj, "duration", &JsValue::from_f64(vars.duration));
        if vars.delay > 0.0 {
            put(&obj, "delay", &JsValue::from_f64(vars.delay));
        }
        if vars.stagger > 0.0 {
            put(&obj, "stagger", &JsValue::from_f64(vars.stagger));
        }
        if let Some(ease) = vars.ease {
            put(&obj, "ease", &JsValue::from_str(ease.name()));
        }
    }
    if vars.force_3d {
        put(&obj, "force3D", &JsValue::TRUE);
    }
    obj
}

impl TweenEngine<Element> for GsapEngine {
    fn is_available(&self) -> bool {
        self.gsap.is_some()
    }

    fn set(&mut self, targets: &[Element], vars: &TweenVars) {
        self.call("set", targets, &vars_object(vars, false));
    }

    fn animate(
        &mut self,
        targets: &[Element],
        vars: &TweenVars,
        on_complete: Option<OnComplete<Element>>,
    ) {
        let obj = vars_object(vars, true);
        if let Some(callback) = on_complete {
            let mut engine = self.clone();
            let js = Closure::once_into_js(move || callback(&mut engine));
            put(&obj, "onComplete", &js);
        }
        self.call("to", targets, &obj);
    }
}
