//! Read-only depth snapshots served to external adapters.

use serde::{Deserialize, Serialize};

use tapematch_types::OrderId;

/// One resting order inside a level snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: OrderId,
    pub remaining_qty: u64,
}

/// Aggregated view of one price level, active orders only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: u64,
    pub total_qty: u64,
    pub order_count: usize,
    /// Per-order remaining quantities in FIFO order.
    pub orders: Vec<OrderSnapshot>,
}
