//! A single price level in the order book.
//!
//! Orders at the same price are stored in FIFO order (time priority)
//! using a [`VecDeque`]. Removal by id preserves the relative order of
//! the remaining orders.

use std::collections::VecDeque;

use tapematch_types::{Order, OrderId};

/// A single price level containing all orders at that price.
///
/// Orders are stored in arrival order (FIFO) -- the front of the deque
/// has the highest time priority and will be filled first.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// The price at this level.
    pub price: u64,
    /// Orders in time-priority order (front = oldest = highest priority).
    orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Create a new empty price level.
    #[must_use]
    pub fn new(price: u64) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
        }
    }

    /// Add an order to the back of this level (lowest time priority).
    pub fn push_back(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Remove and return the front (oldest / highest priority) order.
    pub fn pop_front(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    /// Peek at the front order without removing it.
    #[must_use]
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Mutable access to the front order.
    pub fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Remove a specific order by id. Returns the removed order, or `None`.
    pub fn remove_order(&mut self, order_id: &OrderId) -> Option<Order> {
        let pos = self.orders.iter().position(|o| o.id() == *order_id)?;
        self.orders.remove(pos)
    }

    /// Total remaining quantity of **active** orders at this level.
    ///
    /// Exhausted or cancelled entries awaiting lazy cleanup contribute
    /// nothing.
    #[must_use]
    pub fn total_active_quantity(&self) -> u64 {
        self.orders
            .iter()
            .filter(|o| o.is_active())
            .map(Order::remaining_qty)
            .sum()
    }

    /// Number of active orders at this level.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.orders.iter().filter(|o| o.is_active()).count()
    }

    /// Iterate the orders in FIFO order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Returns `true` if there are no orders at this level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of orders at this level, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }
}
