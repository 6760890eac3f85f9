//! Event emission and delivery-order guarantees.

use tapematch_engine::{CapturingListener, MatchingEngine};
use tapematch_types::{
    BookChange, EngineConfig, EngineEvent, EventKind, Order, OrderSide,
};
use tempfile::TempDir;

fn engine_in(dir: &TempDir) -> MatchingEngine {
    MatchingEngine::open(&EngineConfig::with_data_dir(dir.path())).unwrap()
}

fn order(side: OrderSide, price: u64, qty: u64) -> Order {
    Order::new(side, price, qty).unwrap()
}

fn book_events(listener: &CapturingListener) -> Vec<(OrderSide, u64, BookChange)> {
    listener
        .events()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::OrderBook(e) => Some((e.side, e.price, e.change)),
            EngineEvent::TradeExecuted(_) => None,
        })
        .collect()
}

#[test]
fn resting_order_emits_add() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let listener = CapturingListener::new();
    engine.subscribe(EventKind::OrderBook, listener.handler());

    engine.submit(order(OrderSide::Buy, 101, 5)).unwrap();

    assert_eq!(
        book_events(&listener),
        vec![(OrderSide::Buy, 101, BookChange::Add)]
    );
}

#[test]
fn full_fill_emits_remove_for_resting_order() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let listener = CapturingListener::new();
    engine.subscribe(EventKind::OrderBook, listener.handler());

    engine.submit(order(OrderSide::Sell, 100, 4)).unwrap();
    engine.submit(order(OrderSide::Buy, 100, 4)).unwrap();

    assert_eq!(
        book_events(&listener),
        vec![
            (OrderSide::Sell, 100, BookChange::Add),
            (OrderSide::Sell, 100, BookChange::Remove),
        ]
    );
}

#[test]
fn cancel_emits_cancel_with_book_context() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let listener = CapturingListener::new();
    engine.subscribe(EventKind::OrderBook, listener.handler());

    let buy = order(OrderSide::Buy, 100, 10);
    let buy_id = buy.id();
    engine.submit(buy).unwrap();
    engine.cancel(&buy_id).unwrap();

    let events = book_events(&listener);
    assert_eq!(events.last(), Some(&(OrderSide::Buy, 100, BookChange::Cancel)));
}

#[test]
fn trade_events_arrive_in_execution_order() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let listener = CapturingListener::new();
    engine.subscribe(EventKind::TradeExecuted, listener.handler());

    engine.submit(order(OrderSide::Sell, 100, 5)).unwrap();
    engine.submit(order(OrderSide::Sell, 100, 5)).unwrap();
    let fills = engine.submit(order(OrderSide::Buy, 100, 8)).unwrap();

    let seen = listener.trades();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen, fills);
}

#[test]
fn wildcard_listener_sees_everything_interleaved() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let listener = CapturingListener::new();
    engine.subscribe_all(listener.handler());

    engine.submit(order(OrderSide::Sell, 100, 5)).unwrap();
    engine.submit(order(OrderSide::Buy, 100, 5)).unwrap();

    let events = listener.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], EngineEvent::OrderBook(_)), "sell rests");
    assert!(matches!(events[1], EngineEvent::TradeExecuted(_)));
    assert!(
        matches!(&events[2], EngineEvent::OrderBook(e) if e.change == BookChange::Remove),
        "filled sell leaves the book"
    );
}

#[test]
fn kind_subscribers_run_before_wildcard() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let specific = CapturingListener::new();
    let wildcard = CapturingListener::new();

    // Registered wildcard first on purpose; kind-specific still wins.
    engine.subscribe_all({
        let specific = specific.clone();
        let wildcard = wildcard.clone();
        Box::new(move |event| {
            assert_eq!(
                specific.len(),
                wildcard.len() + 1,
                "specific handler must already have seen this event"
            );
            let _ = event;
        })
    });
    engine.subscribe(EventKind::OrderBook, specific.handler());
    engine.subscribe_all(wildcard.handler());

    engine.submit(order(OrderSide::Buy, 100, 1)).unwrap();
    assert_eq!(specific.len(), 1);
    assert_eq!(wildcard.len(), 1);
}

#[test]
fn no_match_no_trade_events() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let listener = CapturingListener::new();
    engine.subscribe(EventKind::TradeExecuted, listener.handler());

    engine.submit(order(OrderSide::Buy, 99, 5)).unwrap();
    engine.submit(order(OrderSide::Sell, 105, 5)).unwrap();

    assert!(listener.is_empty());
}

#[test]
fn refused_cancel_emits_nothing() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let listener = CapturingListener::new();
    engine.subscribe_all(listener.handler());

    let buy = order(OrderSide::Buy, 100, 1);
    let buy_id = buy.id();
    engine.submit(buy).unwrap();
    engine.cancel(&buy_id).unwrap();
    let before = listener.len();

    assert!(!engine.cancel(&buy_id).unwrap());
    assert_eq!(listener.len(), before);
}
