//! The complete two-sided order book.
//!
//! Composes a bid [`BookSide`], an ask [`BookSide`], and an order-id index
//! mapping every resting order to its side and price level. The index and
//! the side queues are owned by one type and updated together, so the two
//! views cannot drift apart.
//!
//! The book performs no matching or execution; that belongs to the engine.

use std::collections::HashMap;

use tapematch_types::{Order, OrderId, OrderSide, Result, TapematchError};

use crate::side::BookSide;
use crate::snapshot::LevelSnapshot;

/// Points at a resting order's current side and price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLocator {
    pub side: OrderSide,
    pub price: u64,
}

/// The order book for a single instrument.
#[derive(Debug)]
pub struct OrderBook {
    bids: BookSide,
    asks: BookSide,
    /// Fast lookup: id -> (side, price) for O(1) cancel routing.
    /// An id is present iff the order is currently resting.
    index: HashMap<OrderId, OrderLocator>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(OrderSide::Buy),
            asks: BookSide::new(OrderSide::Sell),
            index: HashMap::new(),
        }
    }

    fn side(&self, side: OrderSide) -> &BookSide {
        match side {
            OrderSide::Buy => &self.bids,
            OrderSide::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: OrderSide) -> &mut BookSide {
        match side {
            OrderSide::Buy => &mut self.bids,
            OrderSide::Sell => &mut self.asks,
        }
    }

    // =================================================================
    // Insertion
    // =================================================================

    /// Add an order to the correct side and record its locator.
    ///
    /// Errors with [`TapematchError::OrderNotActive`] if the order is
    /// already filled or cancelled.
    pub fn add_order(&mut self, order: Order) -> Result<()> {
        if !order.is_active() {
            return Err(TapematchError::OrderNotActive(order.id()));
        }
        let locator = OrderLocator {
            side: order.side(),
            price: order.price(),
        };
        self.index.insert(order.id(), locator);
        self.side_mut(locator.side).add_resting(order);
        Ok(())
    }

    // =================================================================
    // Cancellation
    // =================================================================

    /// Cancel an order by id. Returns `false` with no side effect if the
    /// id is unknown (never resting, already filled, or already
    /// cancelled) — which makes cancellation idempotent.
    pub fn cancel_order(&mut self, id: &OrderId) -> bool {
        let Some(locator) = self.index.get(id).copied() else {
            return false;
        };
        let cancelled = self.side_mut(locator.side).cancel_by_id(id, locator.price);
        if cancelled {
            self.index.remove(id);
        }
        cancelled
    }

    /// Where is this order resting, if at all?
    #[must_use]
    pub fn locate(&self, id: &OrderId) -> Option<OrderLocator> {
        self.index.get(id).copied()
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Current best bid price. Errors if no BUY orders rest in the book.
    pub fn best_bid(&self) -> Result<u64> {
        self.bids
            .best_price()
            .ok_or(TapematchError::EmptySide(OrderSide::Buy))
    }

    /// Current best ask price. Errors if no SELL orders rest in the book.
    pub fn best_ask(&self) -> Result<u64> {
        self.asks
            .best_price()
            .ok_or(TapematchError::EmptySide(OrderSide::Sell))
    }

    /// Returns `true` when best bid >= best ask, i.e. matching is possible.
    #[must_use]
    pub fn has_crossing(&self) -> bool {
        match (self.bids.best_price(), self.asks.best_price()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// The oldest order at the best price on `side`, without removal.
    #[must_use]
    pub fn peek_best(&self, side: OrderSide) -> Option<&Order> {
        self.side(side).peek_best()
    }

    /// Mutable access to the oldest order at the best price on `side`.
    pub fn best_order_mut(&mut self, side: OrderSide) -> Option<&mut Order> {
        self.side_mut(side).best_order_mut()
    }

    /// Check if an order is currently resting.
    #[must_use]
    pub fn contains_order(&self, id: &OrderId) -> bool {
        self.index.contains_key(id)
    }

    /// Total number of resting orders across both sides.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Number of distinct bid price levels.
    #[must_use]
    pub fn bid_depth(&self) -> usize {
        self.bids.depth()
    }

    /// Number of distinct ask price levels.
    #[must_use]
    pub fn ask_depth(&self) -> usize {
        self.asks.depth()
    }

    /// Returns `true` if neither side has resting orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    // =================================================================
    // Maintenance
    // =================================================================

    /// Pop the head of `side`'s best level if it is filled or cancelled,
    /// also purging its index entry. No-op while the head is active.
    pub fn remove_best_if_inactive(&mut self, side: OrderSide) -> Option<Order> {
        let popped = self.side_mut(side).remove_best_if_inactive()?;
        self.index.remove(&popped.id());
        Some(popped)
    }

    // =================================================================
    // Snapshots
    // =================================================================

    /// Active bid levels, best (highest) price first.
    #[must_use]
    pub fn snapshot_bids(&self) -> Vec<LevelSnapshot> {
        self.bids.snapshot_levels()
    }

    /// Active ask levels, best (lowest) price first.
    #[must_use]
    pub fn snapshot_asks(&self) -> Vec<LevelSnapshot> {
        self.asks.snapshot_levels()
    }
}
