//! Ready-made event listeners.

use std::sync::{Arc, Mutex, PoisonError};

use tapematch_types::{EngineEvent, Trade};

use crate::dispatcher::EventHandler;

/// A handler that logs every event through `tracing`.
#[must_use]
pub fn logging_handler() -> EventHandler {
    Box::new(|event| match event {
        EngineEvent::TradeExecuted(e) => {
            tracing::info!(
                price = e.trade.price,
                quantity = e.trade.quantity,
                buy_order_id = %e.trade.buy_order_id,
                sell_order_id = %e.trade.sell_order_id,
                "trade executed"
            );
        }
        EngineEvent::OrderBook(e) => {
            tracing::info!(
                side = %e.side,
                price = e.price,
                change = ?e.change,
                "order book changed"
            );
        }
    })
}

/// Collects every received event, for inspection after the fact.
///
/// Cloning shares the underlying buffer, so one capture can be handed to
/// the dispatcher while the test (or caller) keeps another handle.
#[derive(Debug, Clone, Default)]
pub struct CapturingListener {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl CapturingListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that appends each event to this listener's buffer.
    #[must_use]
    pub fn handler(&self) -> EventHandler {
        let events = Arc::clone(&self.events);
        Box::new(move |event| {
            events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        })
    }

    /// Snapshot of all events received so far, in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Just the trades, in delivery order.
    #[must_use]
    pub fn trades(&self) -> Vec<Trade> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                EngineEvent::TradeExecuted(e) => Some(e.trade),
                EngineEvent::OrderBook(_) => None,
            })
            .collect()
    }

    /// Number of events received so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
