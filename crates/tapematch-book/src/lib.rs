//! # tapematch-book
//!
//! **Price-priority / FIFO order book for TapeMatch.**
//!
//! The book is a pure in-memory structure with no side effects:
//!
//! - **Price priority**: bids match highest-first, asks lowest-first
//! - **Time priority**: FIFO within a price level
//! - **O(1) cancel lookup**: an id index maps every resting order to its
//!   side and price level
//! - **No matching logic**: crossing and fills belong to the engine crate

pub mod orderbook;
pub mod price_level;
pub mod side;
pub mod snapshot;

pub use orderbook::{OrderBook, OrderLocator};
pub use price_level::PriceLevel;
pub use side::BookSide;
pub use snapshot::{LevelSnapshot, OrderSnapshot};
