//! Navigation and hover intent triggers.
//!
//! `RouteTrigger` warms the resource behind a route with the reactive
//! budget. `HoverTrigger` arms one-shot pointer-enter listeners that call
//! into a `RouteTrigger` the first time an element is hovered.

pub mod hover;
pub mod route;

pub use hover::{
    Delivery, Document, DocumentCapability, HoverListener, HoverTrigger, ListenerState, NoDocument,
};
pub use route::RouteTrigger;
