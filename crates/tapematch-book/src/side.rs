//! One side of the order book (bids or asks).
//!
//! Uses `BTreeMap<u64, PriceLevel>` for price ordering; which end of the
//! map is "best" depends on the side: bids match highest price first,
//! asks lowest first. FIFO within a level comes from [`PriceLevel`].
//!
//! Invariant: a price level is removed the instant its queue empties, so
//! best-price queries never observe an empty level.

use std::collections::BTreeMap;

use tapematch_types::{Order, OrderId, OrderSide};

use crate::price_level::PriceLevel;
use crate::snapshot::{LevelSnapshot, OrderSnapshot};

/// A one-sided price-priority + time-priority container.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: OrderSide,
    levels: BTreeMap<u64, PriceLevel>,
}

impl BookSide {
    /// Create an empty side with the given orientation.
    #[must_use]
    pub fn new(side: OrderSide) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Which orientation this side has.
    #[must_use]
    pub fn side(&self) -> OrderSide {
        self.side
    }

    /// Returns `true` if this side has no resting orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of distinct price levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// The best price currently available on this side, or `None` if empty.
    #[must_use]
    pub fn best_price(&self) -> Option<u64> {
        match self.side {
            OrderSide::Buy => self.levels.keys().next_back().copied(),
            OrderSide::Sell => self.levels.keys().next().copied(),
        }
    }

    fn best_level_mut(&mut self) -> Option<&mut PriceLevel> {
        match self.side {
            OrderSide::Buy => self.levels.values_mut().next_back(),
            OrderSide::Sell => self.levels.values_mut().next(),
        }
    }

    fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            OrderSide::Buy => self.levels.values().next_back(),
            OrderSide::Sell => self.levels.values().next(),
        }
    }

    /// Iterate levels from best to worst.
    fn levels_best_first(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            OrderSide::Buy => Box::new(self.levels.values().rev()),
            OrderSide::Sell => Box::new(self.levels.values()),
        }
    }

    /// Add a resting order to this side.
    ///
    /// The caller guarantees the order's side matches this side's
    /// orientation; the book type one level up enforces it.
    pub fn add_resting(&mut self, order: Order) {
        debug_assert_eq!(order.side(), self.side);
        let price = order.price();
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(order);
    }

    /// The oldest resting order at the best price level, without removal.
    #[must_use]
    pub fn peek_best(&self) -> Option<&Order> {
        self.best_level().and_then(PriceLevel::front)
    }

    /// Mutable access to the oldest order at the best price level.
    pub fn best_order_mut(&mut self) -> Option<&mut Order> {
        self.best_level_mut().and_then(PriceLevel::front_mut)
    }

    /// Pop the head of the best level if it is filled or cancelled,
    /// removing the level when it empties. No-op while the head is active.
    pub fn remove_best_if_inactive(&mut self) -> Option<Order> {
        let best_price = self.best_price()?;
        let level = self.levels.get_mut(&best_price)?;
        if level.front().is_some_and(Order::is_active) {
            return None;
        }
        let popped = level.pop_front();
        if level.is_empty() {
            self.levels.remove(&best_price);
        }
        popped
    }

    /// Cancel the order with `id` resting at `price`.
    ///
    /// Removes it from the level's queue (remainder keeps its relative
    /// order), marks it cancelled, and drops the level if now empty.
    /// Returns `false` if the id is not present at that price.
    pub fn cancel_by_id(&mut self, id: &OrderId, price: u64) -> bool {
        let Some(level) = self.levels.get_mut(&price) else {
            return false;
        };
        let Some(mut order) = level.remove_order(id) else {
            return false;
        };
        if level.is_empty() {
            self.levels.remove(&price);
        }
        // The index only points at resting (active) orders, so this
        // transition cannot fail; an inactive order would already have
        // left the index.
        order.cancel().is_ok()
    }

    /// Aggregate the active orders on this side, best price first.
    ///
    /// Entries already filled or cancelled but not yet lazily cleaned up
    /// are skipped, as are levels left with no active orders.
    #[must_use]
    pub fn snapshot_levels(&self) -> Vec<LevelSnapshot> {
        self.levels_best_first()
            .filter_map(|level| {
                let orders: Vec<OrderSnapshot> = level
                    .iter()
                    .filter(|o| o.is_active() && o.remaining_qty() > 0)
                    .map(|o| OrderSnapshot {
                        order_id: o.id(),
                        remaining_qty: o.remaining_qty(),
                    })
                    .collect();
                if orders.is_empty() {
                    return None;
                }
                Some(LevelSnapshot {
                    price: level.price,
                    total_qty: orders.iter().map(|o| o.remaining_qty).sum(),
                    order_count: orders.len(),
                    orders,
                })
            })
            .collect()
    }
}
