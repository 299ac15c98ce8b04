// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory test doubles for the page, geometry, tween, and host seams.
//!
//! Every double is a cheap handle over shared state, so a test can hand one
//! clone to the orchestrator and keep another for inspection.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Rect;

use crate::geometry::GeometryProvider;
use crate::orchestrator::{Clock, EventSource, Host, SetupError};
use crate::page::Page;
use crate::tween::{OnComplete, TweenEngine, TweenVars};

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

struct Node {
    id: u32,
    tokens: Vec<String>,
    parent: Option<u32>,
}

#[derive(Default)]
struct PageData {
    nodes: Vec<Node>,
    body: Option<u32>,
    next_id: u32,
}

impl PageData {
    fn alloc(&mut self, tokens: &[&str], parent: Option<u32>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push(Node {
            id,
            tokens: tokens.iter().map(ToString::to_string).collect(),
            parent,
        });
        id
    }

    fn parent_of(&self, id: u32) -> Option<u32> {
        self.nodes.iter().find(|n| n.id == id).and_then(|n| n.parent)
    }

    fn is_descendant(&self, mut id: u32, ancestor: u32) -> bool {
        while let Some(p) = self.parent_of(id) {
            if p == ancestor {
                return true;
            }
            id = p;
        }
        false
    }
}

/// Elements are `u32` ids; a selector matches an element carrying that exact
/// token. Document order is insertion order.
#[derive(Clone, Default)]
pub(crate) struct FakePage {
    inner: Rc<RefCell<PageData>>,
}

impl FakePage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, token: &str) -> u32 {
        self.inner.borrow_mut().alloc(&[token], None)
    }

    pub(crate) fn add_with_classes(&mut self, tokens: &[&str]) -> u32 {
        self.inner.borrow_mut().alloc(tokens, None)
    }

    pub(crate) fn add_child(&mut self, parent: u32, token: &str) -> u32 {
        self.inner.borrow_mut().alloc(&[token], Some(parent))
    }

    pub(crate) fn with_body(&mut self) {
        let mut data = self.inner.borrow_mut();
        let id = data.alloc(&[], None);
        data.body = Some(id);
    }

    pub(crate) fn body_id(&self) -> u32 {
        self.inner.borrow().body.expect("page has no body")
    }
}

impl Page for FakePage {
    type Element = u32;

    fn query_all(&self, selector: &str) -> Vec<u32> {
        self.inner
            .borrow()
            .nodes
            .iter()
            .filter(|n| n.tokens.iter().any(|t| t == selector))
            .map(|n| n.id)
            .collect()
    }

    fn query(&self, selector: &str) -> Option<u32> {
        self.query_all(selector).into_iter().next()
    }

    fn query_within(&self, parent: &u32, selector: &str) -> Vec<u32> {
        let data = self.inner.borrow();
        data.nodes
            .iter()
            .filter(|n| n.tokens.iter().any(|t| t == selector))
            .filter(|n| data.is_descendant(n.id, *parent))
            .map(|n| n.id)
            .collect()
    }

    fn body(&self) -> Option<u32> {
        self.inner.borrow().body
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

struct GeometryData {
    boxes: BTreeMap<u32, Rect>,
    height: f64,
    narrow: bool,
}

/// Elements without a placed box behave as detached.
#[derive(Clone)]
pub(crate) struct FakeGeometry {
    inner: Rc<RefCell<GeometryData>>,
}

impl FakeGeometry {
    pub(crate) fn new(height: f64, narrow: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GeometryData {
                boxes: BTreeMap::new(),
                height,
                narrow,
            })),
        }
    }

    pub(crate) fn place(&self, id: u32, top: f64, height: f64) {
        self.inner
            .borrow_mut()
            .boxes
            .insert(id, Rect::new(0.0, top, 100.0, top + height));
    }

    pub(crate) fn detach(&self, id: u32) {
        self.inner.borrow_mut().boxes.remove(&id);
    }

    pub(crate) fn set_viewport(&self, height: f64, narrow: bool) {
        let mut data = self.inner.borrow_mut();
        data.height = height;
        data.narrow = narrow;
    }
}

impl GeometryProvider<u32> for FakeGeometry {
    fn bounding_box(&self, element: &u32) -> Option<Rect> {
        self.inner.borrow().boxes.get(element).copied()
    }

    fn viewport_height(&self) -> f64 {
        self.inner.borrow().height
    }

    fn is_narrow_viewport(&self) -> bool {
        self.inner.borrow().narrow
    }
}

// ---------------------------------------------------------------------------
// Tween engine
// ---------------------------------------------------------------------------

/// A recorded engine request.
#[derive(Clone, Debug)]
pub(crate) enum Call {
    Set {
        targets: Vec<u32>,
        vars: TweenVars,
    },
    Animate {
        targets: Vec<u32>,
        vars: TweenVars,
        chained: bool,
    },
}

impl Call {
    pub(crate) fn targets(&self) -> &[u32] {
        match self {
            Self::Set { targets, .. } | Self::Animate { targets, .. } => targets,
        }
    }
}

#[derive(Clone, Copy, Default)]
struct Props {
    opacity: Option<f64>,
    y: Option<f64>,
}

struct EngineData {
    available: bool,
    calls: Vec<Call>,
    state: BTreeMap<u32, Props>,
    pending: Vec<OnComplete<u32>>,
}

/// Applies targets instantly and parks completion callbacks until
/// [`complete_all`](Self::complete_all).
#[derive(Clone)]
pub(crate) struct FakeEngine {
    inner: Rc<RefCell<EngineData>>,
}

impl FakeEngine {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(EngineData {
                available: true,
                calls: Vec::new(),
                state: BTreeMap::new(),
                pending: Vec::new(),
            })),
        }
    }

    pub(crate) fn set_available(&self, available: bool) {
        self.inner.borrow_mut().available = available;
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    pub(crate) fn opacity(&self, id: u32) -> Option<f64> {
        self.inner.borrow().state.get(&id).and_then(|p| p.opacity)
    }

    pub(crate) fn y(&self, id: u32) -> Option<f64> {
        self.inner.borrow().state.get(&id).and_then(|p| p.y)
    }

    pub(crate) fn pending_completions(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Fires every parked completion, including ones queued by completions.
    pub(crate) fn complete_all(&self) {
        loop {
            let pending = core::mem::take(&mut self.inner.borrow_mut().pending);
            if pending.is_empty() {
                break;
            }
            let mut handle = self.clone();
            for callback in pending {
                callback(&mut handle);
            }
        }
    }

    fn apply(&self, targets: &[u32], vars: &TweenVars) {
        let mut data = self.inner.borrow_mut();
        for &id in targets {
            let props = data.state.entry(id).or_default();
            if let Some(o) = vars.opacity {
                props.opacity = Some(o);
            }
            if let Some(y) = vars.y {
                props.y = Some(y);
            }
        }
    }
}

impl TweenEngine<u32> for FakeEngine {
    fn is_available(&self) -> bool {
        self.inner.borrow().available
    }

    fn set(&mut self, targets: &[u32], vars: &TweenVars) {
        self.inner.borrow_mut().calls.push(Call::Set {
            targets: targets.to_vec(),
            vars: vars.clone(),
        });
        self.apply(targets, vars);
    }

    fn animate(&mut self, targets: &[u32], vars: &TweenVars, on_complete: Option<OnComplete<u32>>) {
        let mut data = self.inner.borrow_mut();
        data.calls.push(Call::Animate {
            targets: targets.to_vec(),
            vars: vars.clone(),
            chained: on_complete.is_some(),
        });
        if let Some(callback) = on_complete {
            data.pending.push(callback);
        }
        drop(data);
        self.apply(targets, vars);
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Scroll,
    Resize,
}

type Handler = Rc<RefCell<Box<dyn FnMut()>>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Kind, Handler)>,
}

/// Registration handle; removes its handler on drop.
pub(crate) struct FakeListener {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().handlers.retain(|(id, ..)| *id != self.id);
        }
    }
}

/// Dispatches events synchronously when the test fires them.
pub(crate) struct FakeHost {
    registry: Rc<RefCell<Registry>>,
    scroll_container: bool,
    fail_resize: bool,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self {
            registry: Rc::default(),
            scroll_container: true,
            fail_resize: false,
        }
    }

    pub(crate) fn without_scroll_container(&mut self) {
        self.scroll_container = false;
    }

    pub(crate) fn fail_on_resize(&mut self) {
        self.fail_resize = true;
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    pub(crate) fn fire_scroll(&self) {
        self.fire(Kind::Scroll);
    }

    pub(crate) fn fire_resize(&self) {
        self.fire(Kind::Resize);
    }

    fn fire(&self, kind: Kind) {
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            (handler.borrow_mut())();
        }
    }
}

fn zero_clock() -> f64 {
    0.0
}

impl Host for FakeHost {
    type Listener = FakeListener;

    fn clock(&self) -> Clock {
        zero_clock
    }

    fn listen(
        &mut self,
        source: EventSource<'_>,
        handler: Box<dyn FnMut()>,
    ) -> Result<Option<FakeListener>, SetupError> {
        let kind = match source {
            EventSource::Scroll { .. } if !self.scroll_container => return Ok(None),
            EventSource::Scroll { .. } => Kind::Scroll,
            EventSource::Resize if self.fail_resize => {
                return Err(SetupError::Listener("resize refused".to_string()));
            }
            EventSource::Resize => Kind::Resize,
        };
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .handlers
            .push((id, kind, Rc::new(RefCell::new(handler))));
        Ok(Some(FakeListener {
            id,
            registry: Rc::downgrade(&self.registry),
        }))
    }
}
