//! The matching engine.
//!
//! Single-writer: all mutation goes through `&mut self`, so matching,
//! logging, and event dispatch for one command complete before the next
//! command is looked at. Commands are durably logged before they touch
//! the book; a command that cannot be logged is rejected outright.

use chrono::Utc;
use tapematch_book::{LevelSnapshot, OrderBook};
use tapematch_journal::{CommandLog, FileTradeStore};
use tapematch_types::{
    BookChange, EngineConfig, EngineEvent, EventKind, Order, OrderBookEvent, OrderId, OrderSide,
    Result, TapematchError, Trade, TradeExecutedEvent,
};

use crate::dispatcher::{EventDispatcher, EventHandler};

/// Price/time-priority matching engine for a single instrument.
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
    trades: Vec<Trade>,
    command_log: CommandLog,
    trade_store: FileTradeStore,
    dispatcher: EventDispatcher,
    /// While set, incoming commands are treated as already logged:
    /// nothing is appended to the command log and no events are
    /// published. Trades are still written to the ledger, which is how
    /// it gets rebuilt.
    replay_mode: bool,
}

impl MatchingEngine {
    /// Open an engine over the files named by `config`.
    ///
    /// The book starts empty; call [`recover`](Self::recover) to verify
    /// the command log and rebuild state from it.
    pub fn open(config: &EngineConfig) -> Result<Self> {
        let command_log = CommandLog::open(config.command_log_path())?;
        let trade_store = FileTradeStore::new(config.trade_ledger_path());
        Ok(Self {
            book: OrderBook::new(),
            trades: Vec::new(),
            command_log,
            trade_store,
            dispatcher: EventDispatcher::new(),
            replay_mode: false,
        })
    }

    // =================================================================
    // Commands
    // =================================================================

    /// Submit a limit order: log it, match it against the opposite side,
    /// and rest any remainder in the book.
    ///
    /// Returns the trades executed by this submission, in execution
    /// order. Matching continues while the order is still active and the
    /// best opposing price satisfies its limit; each fill trades at the
    /// resting order's price for the smaller of the two remaining
    /// quantities.
    pub fn submit(&mut self, mut incoming: Order) -> Result<Vec<Trade>> {
        if !incoming.is_active() {
            return Err(TapematchError::OrderNotActive(incoming.id()));
        }
        if !self.replay_mode {
            self.command_log.append_order(&incoming)?;
        }

        let opposing_side = incoming.side().opposite();
        let mut fills = Vec::new();

        while incoming.is_active() {
            let Some(resting) = self.book.best_order_mut(opposing_side) else {
                break;
            };
            if !incoming.can_match(resting.price()) {
                break;
            }

            let quantity = incoming.remaining_qty().min(resting.remaining_qty());
            let resting_id = resting.id();
            let resting_price = resting.price();
            resting.execute(quantity)?;
            incoming.execute(quantity)?;

            let (buy_id, sell_id) = match incoming.side() {
                OrderSide::Buy => (incoming.id(), resting_id),
                OrderSide::Sell => (resting_id, incoming.id()),
            };
            let trade = Trade::new(buy_id, sell_id, resting_price, quantity)?;
            tracing::debug!(
                price = trade.price,
                quantity = trade.quantity,
                incoming = %incoming.id(),
                resting = %resting_id,
                "fill"
            );
            self.trade_store.save(&trade)?;
            self.trades.push(trade.clone());
            self.emit(EngineEvent::TradeExecuted(TradeExecutedEvent::new(
                trade.clone(),
            )));
            fills.push(trade);

            if let Some(removed) = self.book.remove_best_if_inactive(opposing_side) {
                self.emit(EngineEvent::OrderBook(OrderBookEvent::new(
                    removed.side(),
                    removed.price(),
                    BookChange::Remove,
                )));
            }
        }

        if incoming.is_active() {
            let (side, price) = (incoming.side(), incoming.price());
            self.book.add_order(incoming)?;
            self.emit(EngineEvent::OrderBook(OrderBookEvent::new(
                side,
                price,
                BookChange::Add,
            )));
        }

        Ok(fills)
    }

    /// Cancel a resting order by id.
    ///
    /// Returns `Ok(false)` without logging anything if the id is not
    /// currently resting, which makes retried cancels harmless.
    pub fn cancel(&mut self, id: &OrderId) -> Result<bool> {
        let Some(locator) = self.book.locate(id) else {
            return Ok(false);
        };
        if !self.replay_mode {
            self.command_log.append_cancel(*id, Utc::now())?;
        }
        let cancelled = self.book.cancel_order(id);
        if cancelled {
            self.emit(EngineEvent::OrderBook(OrderBookEvent::new(
                locator.side,
                locator.price,
                BookChange::Cancel,
            )));
        }
        Ok(cancelled)
    }

    // =================================================================
    // Events
    // =================================================================

    /// Subscribe a handler to one event kind.
    pub fn subscribe(&mut self, kind: EventKind, handler: EventHandler) {
        self.dispatcher.subscribe(kind, handler);
    }

    /// Subscribe a handler to every event kind.
    pub fn subscribe_all(&mut self, handler: EventHandler) {
        self.dispatcher.subscribe_all(handler);
    }

    fn emit(&self, event: EngineEvent) {
        if self.replay_mode {
            return;
        }
        self.dispatcher.publish(&event);
    }

    // =================================================================
    // Replay control
    // =================================================================

    /// Toggle replay mode. See the field docs on [`MatchingEngine`].
    pub fn set_replay_mode(&mut self, enabled: bool) {
        self.replay_mode = enabled;
    }

    /// Whether the engine is currently replaying logged commands.
    #[must_use]
    pub fn is_replay_mode(&self) -> bool {
        self.replay_mode
    }

    // =================================================================
    // Queries
    // =================================================================

    /// All trades executed since boot (or rebuilt by recovery), oldest
    /// first.
    #[must_use]
    pub fn trade_history(&self) -> &[Trade] {
        &self.trades
    }

    /// Current best bid price.
    pub fn best_bid(&self) -> Result<u64> {
        self.book.best_bid()
    }

    /// Current best ask price.
    pub fn best_ask(&self) -> Result<u64> {
        self.book.best_ask()
    }

    /// Is this order currently resting in the book?
    #[must_use]
    pub fn contains_order(&self, id: &OrderId) -> bool {
        self.book.contains_order(id)
    }

    /// Total number of resting orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.book.order_count()
    }

    /// Active bid levels, best price first.
    #[must_use]
    pub fn snapshot_bids(&self) -> Vec<LevelSnapshot> {
        self.book.snapshot_bids()
    }

    /// Active ask levels, best price first.
    #[must_use]
    pub fn snapshot_asks(&self) -> Vec<LevelSnapshot> {
        self.book.snapshot_asks()
    }

    pub(crate) fn command_log(&self) -> &CommandLog {
        &self.command_log
    }

    pub(crate) fn trade_store(&self) -> &FileTradeStore {
        &self.trade_store
    }

    pub(crate) fn clear_trades(&mut self) {
        self.trades.clear();
    }
}
