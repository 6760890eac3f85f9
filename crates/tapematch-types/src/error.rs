//! Error types for the TapeMatch matching engine.
//!
//! All errors use the `TM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order / trade validation and state errors
//! - 2xx: Book errors
//! - 3xx: Journal / ledger errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{OrderId, OrderSide};

/// Central error enum for all TapeMatch operations.
#[derive(Debug, Error)]
pub enum TapematchError {
    // =================================================================
    // Order / Trade Errors (1xx)
    // =================================================================
    /// The order failed validation (non-positive price/quantity).
    #[error("TM_ERR_100: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// A state transition was attempted on a filled or cancelled order.
    #[error("TM_ERR_101: Order not active: {0}")]
    OrderNotActive(OrderId),

    /// The trade failed validation (non-positive price/quantity).
    #[error("TM_ERR_102: Invalid trade: {reason}")]
    InvalidTrade { reason: String },

    // =================================================================
    // Book Errors (2xx)
    // =================================================================
    /// A best-price query hit a side with no resting orders.
    #[error("TM_ERR_200: No resting {0} orders in book")]
    EmptySide(OrderSide),

    // =================================================================
    // Journal / Ledger Errors (3xx)
    // =================================================================
    /// The command log hash chain failed verification.
    #[error("TM_ERR_300: Command log tampered at line {line}: {reason}")]
    TamperDetected { line: usize, reason: String },

    /// A command log line could not be parsed.
    #[error("TM_ERR_301: Corrupt command record at line {line}: {reason}")]
    CorruptRecord { line: usize, reason: String },

    /// A trade ledger line could not be parsed.
    #[error("TM_ERR_302: Malformed trade record at line {line}: {reason}")]
    MalformedTrade { line: usize, reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// I/O error (disk).
    #[error("TM_ERR_900: I/O error: {0}")]
    Io(String),

    /// Serialization / deserialization error.
    #[error("TM_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TapematchError>;

impl From<std::io::Error> for TapematchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TapematchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
