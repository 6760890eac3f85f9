//! End-to-end matching behavior through the public engine API.

use tapematch_engine::MatchingEngine;
use tapematch_types::{EngineConfig, Order, OrderId, OrderSide, TapematchError};
use tempfile::TempDir;

fn engine_in(dir: &TempDir) -> MatchingEngine {
    MatchingEngine::open(&EngineConfig::with_data_dir(dir.path())).unwrap()
}

fn order(side: OrderSide, price: u64, qty: u64) -> Order {
    Order::new(side, price, qty).unwrap()
}

#[test]
fn crossing_buy_fills_at_resting_price() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    let sell = order(OrderSide::Sell, 100, 5);
    let sell_id = sell.id();
    assert!(engine.submit(sell).unwrap().is_empty());

    let buy = order(OrderSide::Buy, 101, 3);
    let buy_id = buy.id();
    let fills = engine.submit(buy).unwrap();

    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].price, 100, "trade executes at the resting price");
    assert_eq!(fills[0].quantity, 3);
    assert_eq!(fills[0].buy_order_id, buy_id);
    assert_eq!(fills[0].sell_order_id, sell_id);

    // 2 left of the sell, nothing of the buy.
    assert_eq!(engine.best_ask().unwrap(), 100);
    assert_eq!(engine.snapshot_asks()[0].total_qty, 2);
    assert!(!engine.contains_order(&buy_id));
    assert!(engine.contains_order(&sell_id));
}

#[test]
fn buy_sweeps_multiple_ask_levels() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    engine.submit(order(OrderSide::Sell, 100, 5)).unwrap();
    engine.submit(order(OrderSide::Sell, 101, 4)).unwrap();
    let fills = engine.submit(order(OrderSide::Buy, 102, 6)).unwrap();

    assert_eq!(fills.len(), 2);
    assert_eq!((fills[0].price, fills[0].quantity), (100, 5));
    assert_eq!((fills[1].price, fills[1].quantity), (101, 1));

    let asks = engine.snapshot_asks();
    assert_eq!(asks.len(), 1);
    assert_eq!(asks[0].price, 101);
    assert_eq!(asks[0].total_qty, 3);
    assert!(engine.snapshot_bids().is_empty());
}

#[test]
fn non_crossing_orders_rest() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    assert!(engine.submit(order(OrderSide::Buy, 99, 5)).unwrap().is_empty());
    assert!(engine.submit(order(OrderSide::Sell, 105, 5)).unwrap().is_empty());

    assert_eq!(engine.best_bid().unwrap(), 99);
    assert_eq!(engine.best_ask().unwrap(), 105);
    assert!(engine.trade_history().is_empty());
}

#[test]
fn time_priority_within_a_level() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    let first = order(OrderSide::Sell, 100, 3);
    let second = order(OrderSide::Sell, 100, 3);
    let (first_id, second_id) = (first.id(), second.id());
    engine.submit(first).unwrap();
    engine.submit(second).unwrap();

    let fills = engine.submit(order(OrderSide::Buy, 100, 4)).unwrap();
    assert_eq!(fills.len(), 2);
    assert_eq!(fills[0].sell_order_id, first_id, "older order fills first");
    assert_eq!(fills[0].quantity, 3);
    assert_eq!(fills[1].sell_order_id, second_id);
    assert_eq!(fills[1].quantity, 1);
}

#[test]
fn price_priority_beats_arrival_order() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    engine.submit(order(OrderSide::Sell, 102, 5)).unwrap();
    let better = order(OrderSide::Sell, 100, 5);
    let better_id = better.id();
    engine.submit(better).unwrap();

    let fills = engine.submit(order(OrderSide::Buy, 102, 2)).unwrap();
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].sell_order_id, better_id);
    assert_eq!(fills[0].price, 100);
}

#[test]
fn quantity_is_conserved() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    engine.submit(order(OrderSide::Sell, 100, 7)).unwrap();
    engine.submit(order(OrderSide::Sell, 101, 2)).unwrap();
    engine.submit(order(OrderSide::Buy, 101, 6)).unwrap();

    let traded: u64 = engine.trade_history().iter().map(|t| t.quantity).sum();
    let resting: u64 = engine
        .snapshot_bids()
        .iter()
        .chain(engine.snapshot_asks().iter())
        .map(|level| level.total_qty)
        .sum();
    // 9 sold + 6 bought submitted; every unit is either traded (counted
    // once per side) or still resting.
    assert_eq!(traded, 6);
    assert_eq!(resting, 3);
}

#[test]
fn cancel_removes_resting_order() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    let buy = order(OrderSide::Buy, 100, 10);
    let buy_id = buy.id();
    engine.submit(buy).unwrap();

    assert!(engine.cancel(&buy_id).unwrap());
    assert!(!engine.contains_order(&buy_id));

    // The cancelled order no longer matches anything.
    let fills = engine.submit(order(OrderSide::Sell, 100, 5)).unwrap();
    assert!(fills.is_empty());
    assert_eq!(engine.best_ask().unwrap(), 100);
}

#[test]
fn cancel_unknown_id_is_a_logged_noop() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::with_data_dir(dir.path());
    let mut engine = MatchingEngine::open(&config).unwrap();

    engine.submit(order(OrderSide::Buy, 100, 1)).unwrap();
    let unknown = OrderId::new();
    assert!(!engine.cancel(&unknown).unwrap());

    // A refused cancel leaves no trace in the command log.
    let log = tapematch_journal::CommandLog::open(config.command_log_path()).unwrap();
    assert_eq!(log.read_all().unwrap().len(), 1);
}

#[test]
fn cancel_twice_returns_false_second_time() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    let sell = order(OrderSide::Sell, 100, 5);
    let sell_id = sell.id();
    engine.submit(sell).unwrap();

    assert!(engine.cancel(&sell_id).unwrap());
    assert!(!engine.cancel(&sell_id).unwrap());
}

#[test]
fn filled_order_cannot_be_resubmitted() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    engine.submit(order(OrderSide::Sell, 100, 5)).unwrap();
    let buy = order(OrderSide::Buy, 100, 5);
    let mut replayed = buy.clone();
    engine.submit(buy).unwrap();

    // Drive the clone to filled and try again.
    replayed.execute(5).unwrap();
    let err = engine.submit(replayed).unwrap_err();
    assert!(matches!(err, TapematchError::OrderNotActive(_)));
}

#[test]
fn self_crossing_sides_match_incoming_against_book() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    engine.submit(order(OrderSide::Buy, 100, 4)).unwrap();
    let fills = engine.submit(order(OrderSide::Sell, 99, 4)).unwrap();

    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].price, 100, "resting bid sets the trade price");
    assert!(engine.snapshot_bids().is_empty());
    assert!(engine.snapshot_asks().is_empty());
}
