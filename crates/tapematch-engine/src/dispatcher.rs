//! Synchronous event dispatch.
//!
//! Handlers run inline on the engine's thread, in registration order.
//! Kind-specific handlers always run before wildcard handlers for the
//! same event, so a single publish call has a fully deterministic
//! delivery order.

use std::collections::HashMap;

use tapematch_types::{EngineEvent, EventKind};

/// A subscriber callback. Handlers must not panic; a handler that needs
/// to fail should capture the failure itself.
pub type EventHandler = Box<dyn Fn(&EngineEvent) + Send>;

/// Routes published events to registered handlers.
#[derive(Default)]
pub struct EventDispatcher {
    by_kind: HashMap<EventKind, Vec<EventHandler>>,
    wildcard: Vec<EventHandler>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("kinds", &self.by_kind.keys().collect::<Vec<_>>())
            .field("wildcard_handlers", &self.wildcard.len())
            .finish()
    }
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind.
    pub fn subscribe(&mut self, kind: EventKind, handler: EventHandler) {
        self.by_kind.entry(kind).or_default().push(handler);
    }

    /// Register a handler for every event kind. Wildcard handlers run
    /// after the kind-specific ones.
    pub fn subscribe_all(&mut self, handler: EventHandler) {
        self.wildcard.push(handler);
    }

    /// Deliver `event` to all matching handlers, synchronously.
    pub fn publish(&self, event: &EngineEvent) {
        if let Some(handlers) = self.by_kind.get(&event.kind()) {
            for handler in handlers {
                handler(event);
            }
        }
        for handler in &self.wildcard {
            handler(event);
        }
    }
}
