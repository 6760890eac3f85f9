//! Order types for the TapeMatch matching engine.
//!
//! An [`Order`] owns its own fill and cancel transitions: remaining
//! quantity only ever decreases through [`Order::execute`], and status is
//! always derived from remaining quantity. Side and price are immutable
//! after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderId, Result, TapematchError};

/// Which side of the book this order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// The side an incoming order matches against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifecycle status of an order.
///
/// `Filled` and `Cancelled` are terminal — no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A simple limit order.
///
/// Mutable state (remaining quantity, status) is private; the only way to
/// change it is through [`Order::execute`] and [`Order::cancel`], both of
/// which refuse to touch a terminal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    side: OrderSide,
    price: u64,
    timestamp: DateTime<Utc>,
    remaining_qty: u64,
    status: OrderStatus,
}

impl Order {
    /// Create a new order with a fresh id and the current timestamp.
    pub fn new(side: OrderSide, price: u64, quantity: u64) -> Result<Self> {
        Self::with_id(OrderId::new(), side, price, quantity, Utc::now())
    }

    /// Create an order with explicit id and timestamp, used when replaying
    /// logged commands.
    pub fn with_id(
        id: OrderId,
        side: OrderSide,
        price: u64,
        quantity: u64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        if price == 0 {
            return Err(TapematchError::InvalidOrder {
                reason: "price must be positive".into(),
            });
        }
        if quantity == 0 {
            return Err(TapematchError::InvalidOrder {
                reason: "quantity must be positive".into(),
            });
        }
        Ok(Self {
            id,
            side,
            price,
            timestamp,
            remaining_qty: quantity,
            status: OrderStatus::New,
        })
    }

    #[must_use]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[must_use]
    pub fn side(&self) -> OrderSide {
        self.side
    }

    #[must_use]
    pub fn price(&self) -> u64 {
        self.price
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn remaining_qty(&self) -> u64 {
        self.remaining_qty
    }

    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Can this order trade against an opposing order at `opposing_price`?
    #[must_use]
    pub fn can_match(&self, opposing_price: u64) -> bool {
        match self.side {
            OrderSide::Buy => opposing_price <= self.price,
            OrderSide::Sell => opposing_price >= self.price,
        }
    }

    /// Returns `true` while the order can still be matched or cancelled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.status, OrderStatus::New | OrderStatus::PartiallyFilled)
    }

    /// Fill this order for up to `requested_qty`, returning the quantity
    /// actually filled (`min(requested, remaining)`).
    ///
    /// Errors with [`TapematchError::OrderNotActive`] on a filled or
    /// cancelled order.
    pub fn execute(&mut self, requested_qty: u64) -> Result<u64> {
        if !self.is_active() {
            return Err(TapematchError::OrderNotActive(self.id));
        }

        // Remaining quantity can never go negative.
        let filled = requested_qty.min(self.remaining_qty);
        self.remaining_qty -= filled;

        // Status must reflect remaining quantity.
        self.status = if self.remaining_qty == 0 {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };

        Ok(filled)
    }

    /// Mark this order cancelled. Errors on a terminal order.
    pub fn cancel(&mut self) -> Result<()> {
        if !self.is_active() {
            return Err(TapematchError::OrderNotActive(self.id));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}
