use std::cell::Cell;

use tracing::debug;

use super::RouteTrigger;

/// The DOM/UI layer as seen by the hover trigger.
pub trait Document {
    type Element;

    /// Every navigational element whose target is exactly `route`.
    fn links_to(&self, route: &str) -> Vec<Self::Element>;

    /// Deliver pointer-enter events on `element` to `listener` until it
    /// answers [`Delivery::Detach`].
    fn on_pointer_enter(&self, element: &Self::Element, listener: HoverListener);
}

impl<D: Document + ?Sized> Document for &D {
    type Element = D::Element;

    fn links_to(&self, route: &str) -> Vec<Self::Element> {
        (**self).links_to(route)
    }

    fn on_pointer_enter(&self, element: &Self::Element, listener: HoverListener) {
        (**self).on_pointer_enter(element, listener)
    }
}

/// Whether an interactive document exists in this execution context.
pub enum DocumentCapability<D> {
    Available(D),
    Headless,
}

/// Document type for hosts that never have one.
#[derive(Debug, Clone, Copy)]
pub enum NoDocument {}

impl Document for NoDocument {
    type Element = NoDocument;

    fn links_to(&self, _route: &str) -> Vec<Self::Element> {
        match *self {}
    }

    fn on_pointer_enter(&self, _element: &Self::Element, _listener: HoverListener) {
        match *self {}
    }
}

/// Answer from a listener after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Keep,
    Detach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Armed,
    Fired,
}

/// One-shot registration between a single element and a route.
///
/// The first event fires the route trigger and flips the state to `Fired`.
/// Later events are ignored even if the document keeps delivering them.
pub struct HoverListener {
    route: String,
    trigger: RouteTrigger,
    state: Cell<ListenerState>,
}

impl HoverListener {
    fn new(route: &str, trigger: RouteTrigger) -> Self {
        Self {
            route: route.to_string(),
            trigger,
            state: Cell::new(ListenerState::Armed),
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn state(&self) -> ListenerState {
        self.state.get()
    }

    /// Handle one pointer-enter event.
    pub fn handle(&self) -> Delivery {
        if self.state.replace(ListenerState::Fired) == ListenerState::Armed {
            debug!(route = %self.route, "Hover intent, warming route");
            self.trigger.for_route(&self.route);
        }
        Delivery::Detach
    }
}

/// Arms hover-based prefetching on navigational elements.
pub struct HoverTrigger<D> {
    document: DocumentCapability<D>,
    trigger: RouteTrigger,
}

impl<D: Document> HoverTrigger<D> {
    pub fn new(document: DocumentCapability<D>, trigger: RouteTrigger) -> Self {
        Self { document, trigger }
    }

    /// Attach a one-shot listener to every element targeting `route`.
    /// Without a document this returns before touching any document API.
    pub fn arm(&self, route: &str) {
        let DocumentCapability::Available(ref document) = self.document else {
            return;
        };

        let elements = document.links_to(route);
        debug!(route, elements = elements.len(), "Arming hover prefetch");
        for element in &elements {
            document.on_pointer_enter(element, HoverListener::new(route, self.trigger.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::routes::ResourceKey;
    use crate::testing::{route_trigger, FakeDocument, RecordingClient};

    #[test]
    fn test_two_hovers_fire_once() {
        let client = Arc::new(RecordingClient::default());
        let document = FakeDocument::new([(1, "/standings")]);
        let hover = HoverTrigger::new(
            DocumentCapability::Available(&document),
            route_trigger(&client),
        );

        hover.arm("/standings");
        document.hover(1);
        document.hover(1);

        assert_eq!(
            client.calls(),
            vec![(ResourceKey::new("standings"), Duration::from_secs(120))]
        );
        assert_eq!(document.listener_count(1), 0);
    }

    #[test]
    fn test_each_element_fires_independently() {
        let client = Arc::new(RecordingClient::default());
        let document = FakeDocument::new([(1, "/standings"), (2, "/standings"), (3, "/")]);
        let hover = HoverTrigger::new(
            DocumentCapability::Available(&document),
            route_trigger(&client),
        );

        hover.arm("/standings");
        // One discovery plus one subscription per matching element
        assert_eq!(document.api_calls(), 3);
        assert_eq!(document.listener_count(1), 1);
        assert_eq!(document.listener_count(2), 1);
        assert_eq!(document.listener_count(3), 0);

        document.hover(1);
        document.hover(2);
        document.hover(3);

        assert_eq!(client.calls().len(), 2);
    }

    #[test]
    fn test_rearm_creates_fresh_registration() {
        let client = Arc::new(RecordingClient::default());
        let document = FakeDocument::new([(1, "/")]);
        let hover = HoverTrigger::new(
            DocumentCapability::Available(&document),
            route_trigger(&client),
        );

        hover.arm("/");
        document.hover(1);
        hover.arm("/");
        document.hover(1);
        document.hover(1);

        assert_eq!(client.calls().len(), 2);
    }

    #[test]
    fn test_headless_arm_touches_nothing() {
        let client = Arc::new(RecordingClient::default());
        let hover: HoverTrigger<&FakeDocument> =
            HoverTrigger::new(DocumentCapability::Headless, route_trigger(&client));

        hover.arm("/standings");

        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_no_document_host_arms_without_panicking() {
        let client = Arc::new(RecordingClient::default());
        let hover: HoverTrigger<NoDocument> =
            HoverTrigger::new(DocumentCapability::Headless, route_trigger(&client));

        hover.arm("/");
        hover.arm("/standings");

        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_listener_ignores_late_deliveries() {
        let client = Arc::new(RecordingClient::default());
        let listener = HoverListener::new("/", route_trigger(&client));
        assert_eq!(listener.state(), ListenerState::Armed);
        assert_eq!(listener.route(), "/");

        // A document that ignores Detach keeps calling us
        assert_eq!(listener.handle(), Delivery::Detach);
        assert_eq!(listener.handle(), Delivery::Detach);
        assert_eq!(listener.state(), ListenerState::Fired);
        assert_eq!(client.calls().len(), 1);
    }

    #[test]
    fn test_unmapped_route_hover_issues_nothing() {
        let client = Arc::new(RecordingClient::default());
        let document = FakeDocument::new([(1, "/about")]);
        let hover = HoverTrigger::new(
            DocumentCapability::Available(&document),
            route_trigger(&client),
        );

        hover.arm("/about");
        document.hover(1);

        assert!(client.calls().is_empty());
    }
}
