//! # tapematch-journal
//!
//! **Durable, tamper-evident persistence for TapeMatch.**
//!
//! Two append-only text files back the engine:
//!
//! - [`CommandLog`]: the authoritative record of accepted commands
//!   (ORDER/CANCEL), one JSON record per line, hash-chained so that any
//!   edit, reorder, or deletion is detectable before replay.
//! - [`FileTradeStore`]: a human-inspectable CSV ledger of executed
//!   trades. Not authoritative — it is cleared and rebuilt from command
//!   replay on every boot.
//!
//! Both appends are synchronous and flushed to disk on the calling path:
//! a command that cannot be durably logged is not accepted.

pub mod command_log;
pub mod trade_store;

pub use command_log::{CommandKind, CommandLog, CommandRecord};
pub use trade_store::FileTradeStore;
