//! # tapematch-engine
//!
//! **The TapeMatch matching engine.**
//!
//! Ties the pieces together: the price/time-priority book from
//! `tapematch-book`, the hash-chained command log and trade ledger from
//! `tapematch-journal`, and a synchronous event dispatcher for
//! downstream consumers.
//!
//! ## Typical boot sequence
//!
//! ```no_run
//! use tapematch_engine::MatchingEngine;
//! use tapematch_types::EngineConfig;
//!
//! # fn main() -> tapematch_types::Result<()> {
//! let config = EngineConfig::default();
//! let mut engine = MatchingEngine::open(&config)?;
//! let summary = engine.recover()?;
//! tracing::info!(?summary, "engine ready");
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod engine;
pub mod listeners;
pub mod recovery;

pub use dispatcher::{EventDispatcher, EventHandler};
pub use engine::MatchingEngine;
pub use listeners::{logging_handler, CapturingListener};
pub use recovery::ReplaySummary;
