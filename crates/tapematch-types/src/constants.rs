//! System-wide constants for the TapeMatch matching engine.

/// Sentinel `prev_hash` for the first command log record.
pub const GENESIS_HASH: &str = "GENESIS";

/// Default data directory for journal and ledger files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default command log file name (JSON Lines, hash-chained).
pub const COMMAND_LOG_FILE: &str = "commands.log";

/// Default trade ledger file name (one CSV line per trade).
pub const TRADE_LEDGER_FILE: &str = "trades.csv";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "TapeMatch";
