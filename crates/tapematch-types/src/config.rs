//! Configuration for a TapeMatch engine instance.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

/// File-system layout for the engine's persisted state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the command log and trade ledger.
    pub data_dir: PathBuf,
    /// Command log file name inside `data_dir`.
    pub command_log_file: String,
    /// Trade ledger file name inside `data_dir`.
    pub trade_ledger_file: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            command_log_file: constants::COMMAND_LOG_FILE.to_string(),
            trade_ledger_file: constants::TRADE_LEDGER_FILE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Config rooted at a specific data directory, default file names.
    #[must_use]
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Full path to the command log file.
    #[must_use]
    pub fn command_log_path(&self) -> PathBuf {
        self.data_dir.join(&self.command_log_file)
    }

    /// Full path to the trade ledger file.
    #[must_use]
    pub fn trade_ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.trade_ledger_file)
    }
}
