//! Engine events published to external collaborators.
//!
//! Events are immutable facts emitted by the matching engine after state
//! has changed. Dispatch is synchronous within the triggering call; during
//! recovery replay no events are published at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderSide, Trade};

/// Why the visible state of the order book changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookChange {
    /// An order came to rest in the book.
    Add,
    /// A fully filled order left the book.
    Remove,
    /// An order was cancelled out of the book.
    Cancel,
}

/// Emitted when the visible state of the order book changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEvent {
    pub side: OrderSide,
    pub price: u64,
    pub change: BookChange,
    pub timestamp: DateTime<Utc>,
}

impl OrderBookEvent {
    #[must_use]
    pub fn new(side: OrderSide, price: u64, change: BookChange) -> Self {
        Self {
            side,
            price,
            change,
            timestamp: Utc::now(),
        }
    }
}

/// Emitted whenever a trade is successfully executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeExecutedEvent {
    pub trade: Trade,
    pub timestamp: DateTime<Utc>,
}

impl TradeExecutedEvent {
    #[must_use]
    pub fn new(trade: Trade) -> Self {
        Self {
            trade,
            timestamp: Utc::now(),
        }
    }
}

/// All events the engine can publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    TradeExecuted(TradeExecutedEvent),
    OrderBook(OrderBookEvent),
}

/// Discriminant used for per-kind event subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TradeExecuted,
    OrderBook,
}

impl EngineEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TradeExecuted(_) => EventKind::TradeExecuted,
            Self::OrderBook(_) => EventKind::OrderBook,
        }
    }

    /// The event timestamp, whichever variant this is.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::TradeExecuted(e) => e.timestamp,
            Self::OrderBook(e) => e.timestamp,
        }
    }
}
