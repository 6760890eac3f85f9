//! # tapematch-types
//!
//! Shared types, errors, and configuration for the **TapeMatch** matching engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderId`]
//! - **Order model**: [`Order`], [`OrderSide`], [`OrderStatus`]
//! - **Trade model**: [`Trade`]
//! - **Event model**: [`EngineEvent`], [`EventKind`], [`OrderBookEvent`], [`TradeExecutedEvent`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`TapematchError`] with `TM_ERR_` prefix codes
//! - **Constants**: genesis sentinel, default file names

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod order;
pub mod trade;

// Re-export all primary types at crate root for ergonomic imports:
//   use tapematch_types::{Order, OrderSide, Trade, EngineEvent, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use order::*;
pub use trade::*;

// Constants are accessed via `tapematch_types::constants::FOO`
// (not re-exported to avoid name collisions).
