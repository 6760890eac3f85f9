//! Boot-time recovery from the command log.
//!
//! The command log is the single source of truth. Recovery verifies its
//! hash chain, wipes the derived trade ledger, and replays every logged
//! command through the normal matching path. Because matching is
//! deterministic, the rebuilt book and trade history are identical to
//! the state at the moment the log was last written.

use tapematch_journal::{CommandKind, CommandRecord};
use tapematch_types::{Order, Result, TapematchError};

use crate::engine::MatchingEngine;

/// What a recovery pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub orders_replayed: usize,
    pub cancels_replayed: usize,
    pub trades_rebuilt: usize,
}

impl MatchingEngine {
    /// Verify the command log and rebuild engine state from it.
    ///
    /// Must run on a freshly opened engine, before any live commands.
    /// Fails fast with [`TapematchError::TamperDetected`] if the chain
    /// does not verify; no state is rebuilt from a log that fails
    /// verification. The trade ledger is cleared and rewritten as a side
    /// effect of replay.
    pub fn recover(&mut self) -> Result<ReplaySummary> {
        self.command_log().verify_chain()?;
        let records = self.command_log().read_all()?;

        self.trade_store().clear()?;
        self.clear_trades();

        self.set_replay_mode(true);
        let outcome = self.replay_records(&records);
        self.set_replay_mode(false);

        let mut summary = outcome?;
        summary.trades_rebuilt = self.trade_history().len();
        tracing::info!(
            orders = summary.orders_replayed,
            cancels = summary.cancels_replayed,
            trades = summary.trades_rebuilt,
            "recovery replay complete"
        );
        Ok(summary)
    }

    fn replay_records(&mut self, records: &[CommandRecord]) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();
        for (idx, record) in records.iter().enumerate() {
            match record.kind {
                CommandKind::Order => {
                    let order = order_from_record(record, idx + 1)?;
                    self.submit(order)?;
                    summary.orders_replayed += 1;
                }
                CommandKind::Cancel => {
                    let target =
                        record
                            .cancel_order_id
                            .ok_or_else(|| TapematchError::CorruptRecord {
                                line: idx + 1,
                                reason: "CANCEL record missing cancel_order_id".into(),
                            })?;
                    self.cancel(&target)?;
                    summary.cancels_replayed += 1;
                }
            }
        }
        Ok(summary)
    }
}

fn order_from_record(record: &CommandRecord, line: usize) -> Result<Order> {
    let missing = |field: &str| TapematchError::CorruptRecord {
        line,
        reason: format!("ORDER record missing {field}"),
    };
    let id = record.order_id.ok_or_else(|| missing("order_id"))?;
    let side = record.side.ok_or_else(|| missing("side"))?;
    let price = record.price.ok_or_else(|| missing("price"))?;
    let quantity = record.quantity.ok_or_else(|| missing("quantity"))?;
    Order::with_id(id, side, price, quantity, record.timestamp)
}
