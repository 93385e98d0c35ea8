//! Test doubles shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::policy::{StalenessBudget, StalenessPolicy};
use crate::routes::{ResourceKey, RouteResourceMap};
use crate::scheduler::{CacheClient, PrefetchScheduler};
use crate::triggers::{Delivery, Document, HoverListener, RouteTrigger};

/// Cache client that records every prefetch call.
#[derive(Default)]
pub struct RecordingClient {
    calls: RefCell<Vec<(ResourceKey, Duration)>>,
}

impl RecordingClient {
    pub fn calls(&self) -> Vec<(ResourceKey, Duration)> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl CacheClient for RecordingClient {
    fn prefetch(&self, key: &ResourceKey, stale_time: Duration) {
        self.calls.borrow_mut().push((key.clone(), stale_time));
    }
}

/// `{"/": "games", "/standings": "standings"}` with bulk=300s, reactive=120s.
pub fn route_trigger(client: &Arc<RecordingClient>) -> RouteTrigger {
    RouteTrigger::new(
        Arc::new(RouteResourceMap::from_entries([
            ("/", "games"),
            ("/standings", "standings"),
        ])),
        Arc::new(StalenessPolicy::new(
            StalenessBudget::from_secs(300),
            StalenessBudget::from_secs(120),
        )),
        PrefetchScheduler::new(client.clone()),
    )
}

/// In-memory document: numbered link elements, each targeting one route.
pub struct FakeDocument {
    links: Vec<(u32, String)>,
    listeners: RefCell<HashMap<u32, Vec<HoverListener>>>,
    api_calls: Cell<usize>,
}

impl FakeDocument {
    pub fn new<'a>(links: impl IntoIterator<Item = (u32, &'a str)>) -> Self {
        Self {
            links: links
                .into_iter()
                .map(|(id, route)| (id, route.to_string()))
                .collect(),
            listeners: RefCell::new(HashMap::new()),
            api_calls: Cell::new(0),
        }
    }

    /// Deliver one pointer-enter event, dropping listeners that detach.
    pub fn hover(&self, element: u32) {
        let listeners = self.listeners.borrow_mut().remove(&element).unwrap_or_default();
        let kept: Vec<HoverListener> = listeners
            .into_iter()
            .filter(|listener| listener.handle() == Delivery::Keep)
            .collect();
        if !kept.is_empty() {
            self.listeners.borrow_mut().insert(element, kept);
        }
    }

    pub fn listener_count(&self, element: u32) -> usize {
        self.listeners
            .borrow()
            .get(&element)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.get()
    }
}

impl Document for FakeDocument {
    type Element = u32;

    fn links_to(&self, route: &str) -> Vec<u32> {
        self.api_calls.set(self.api_calls.get() + 1);
        self.links
            .iter()
            .filter(|(_, target)| target == route)
            .map(|(id, _)| *id)
            .collect()
    }

    fn on_pointer_enter(&self, element: &u32, listener: HoverListener) {
        self.api_calls.set(self.api_calls.get() + 1);
        self.listeners
            .borrow_mut()
            .entry(*element)
            .or_default()
            .push(listener);
    }
}
