//! Trade types produced by the TapeMatch engine.
//!
//! A [`Trade`] is the immutable record of a fill between a buy and a sell
//! order. The execution price is always the resting order's limit price —
//! price improvement benefits the incoming order, never the resting one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderId, Result, TapematchError};

/// A completed execution between a buy order and a sell order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// The buy-side order id.
    pub buy_order_id: OrderId,
    /// The sell-side order id.
    pub sell_order_id: OrderId,
    /// Execution price (the resting order's limit price).
    pub price: u64,
    /// Executed quantity.
    pub quantity: u64,
    /// When this trade was executed.
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    /// Create a trade, stamping the current time.
    pub fn new(buy_order_id: OrderId, sell_order_id: OrderId, price: u64, quantity: u64) -> Result<Self> {
        Self::with_timestamp(buy_order_id, sell_order_id, price, quantity, Utc::now())
    }

    /// Create a trade with an explicit timestamp (ledger reload path).
    pub fn with_timestamp(
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: u64,
        quantity: u64,
        executed_at: DateTime<Utc>,
    ) -> Result<Self> {
        if price == 0 {
            return Err(TapematchError::InvalidTrade {
                reason: "price must be positive".into(),
            });
        }
        if quantity == 0 {
            return Err(TapematchError::InvalidTrade {
                reason: "quantity must be positive".into(),
            });
        }
        Ok(Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            executed_at,
        })
    }

    /// Notional value of the trade.
    #[must_use]
    pub fn notional(&self) -> u64 {
        self.price * self.quantity
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trade {} x {} (buy {} / sell {})",
            self.quantity, self.price, self.buy_order_id, self.sell_order_id,
        )
    }
}
