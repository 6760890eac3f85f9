//! Append-only, hash-chained write-ahead log of accepted commands.
//!
//! Stored as JSON Lines so each record is independently appendable and
//! replayable. Every record carries `prev_hash` (the previous record's
//! hash, or the genesis sentinel) and `hash = SHA-256(prev_hash | payload)`
//! over a canonical pipe-joined `key=value` payload. The canonical string
//! is deliberately not a serialization format — JSON field order may vary
//! across library versions, the pipe join never does.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use tapematch_types::constants::GENESIS_HASH;
use tapematch_types::{Order, OrderId, OrderSide, Result, TapematchError};

/// Discriminates the two accepted command shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    Order,
    Cancel,
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Order => write!(f, "ORDER"),
            Self::Cancel => write!(f, "CANCEL"),
        }
    }
}

/// One line of the command log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub kind: CommandKind,

    // ORDER fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,

    // CANCEL fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_order_id: Option<OrderId>,

    pub timestamp: DateTime<Utc>,

    // Hash-chain fields for tamper detection.
    pub prev_hash: String,
    pub hash: String,
}

impl CommandRecord {
    /// Canonical string the record's hash commits to.
    ///
    /// Fixed field order, `key=value` pairs joined by `|`; absent fields
    /// are empty strings. Stable across serde and library versions.
    #[must_use]
    pub fn canonical_payload(&self) -> String {
        fn opt<T: std::fmt::Display>(v: Option<T>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }
        format!(
            "kind={}|order_id={}|side={}|price={}|quantity={}|cancel_order_id={}|timestamp={}",
            self.kind,
            opt(self.order_id),
            opt(self.side),
            opt(self.price),
            opt(self.quantity),
            opt(self.cancel_order_id),
            self.timestamp.to_rfc3339(),
        )
    }
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash of a record chained onto `prev_hash`.
fn chain_hash(prev_hash: &str, record: &CommandRecord) -> String {
    sha256_hex(&format!("{prev_hash}|{}", record.canonical_payload()))
}

/// Append-only write-ahead log of accepted commands.
///
/// Appends are serialized: one lock spans hash computation and the
/// durable write, so concurrent callers can never interleave records or
/// fork the chain.
#[derive(Debug)]
pub struct CommandLog {
    path: PathBuf,
    /// Hash of the last record on disk, or the genesis sentinel.
    tail_hash: Mutex<String>,
}

impl CommandLog {
    /// Open (or create) the log at `path`, caching the current tail hash.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tail = Self::read_records(&path)?
            .last()
            .map_or_else(|| GENESIS_HASH.to_string(), |r| r.hash.clone());
        Ok(Self {
            path,
            tail_hash: Mutex::new(tail),
        })
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an ORDER command for `order`.
    pub fn append_order(&self, order: &Order) -> Result<()> {
        self.append(CommandRecord {
            kind: CommandKind::Order,
            order_id: Some(order.id()),
            side: Some(order.side()),
            price: Some(order.price()),
            quantity: Some(order.remaining_qty()),
            cancel_order_id: None,
            timestamp: order.timestamp(),
            prev_hash: String::new(),
            hash: String::new(),
        })
    }

    /// Append a CANCEL command for `order_id`.
    pub fn append_cancel(&self, order_id: OrderId, timestamp: DateTime<Utc>) -> Result<()> {
        self.append(CommandRecord {
            kind: CommandKind::Cancel,
            order_id: None,
            side: None,
            price: None,
            quantity: None,
            cancel_order_id: Some(order_id),
            timestamp,
            prev_hash: String::new(),
            hash: String::new(),
        })
    }

    fn append(&self, mut record: CommandRecord) -> Result<()> {
        let mut tail = self
            .tail_hash
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        record.prev_hash.clone_from(&*tail);
        record.hash = chain_hash(&record.prev_hash, &record);
        let line = serde_json::to_string(&record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        // The command is only accepted once the record is durable.
        file.sync_all()?;

        tail.clone_from(&record.hash);
        Ok(())
    }

    /// Parse every record in file order. Blank lines are skipped.
    pub fn read_all(&self) -> Result<Vec<CommandRecord>> {
        Self::read_records(&self.path)
    }

    fn read_records(path: &Path) -> Result<Vec<CommandRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(path)?);
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: CommandRecord =
                serde_json::from_str(&line).map_err(|e| TapematchError::CorruptRecord {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Walk the chain, recomputing every expected `prev_hash` and `hash`.
    ///
    /// Fails with [`TapematchError::TamperDetected`] at the first
    /// mismatch — missing, reordered, edited, or truncated records all
    /// break the chain. Must run once at startup before any replay; a
    /// failure is fatal to the boot sequence.
    pub fn verify_chain(&self) -> Result<()> {
        let records = self.read_all()?;
        let mut expected_prev = GENESIS_HASH.to_string();

        for (idx, record) in records.iter().enumerate() {
            if record.prev_hash != expected_prev {
                return Err(TapematchError::TamperDetected {
                    line: idx + 1,
                    reason: "prev_hash mismatch".into(),
                });
            }
            let expected_hash = chain_hash(&expected_prev, record);
            if record.hash != expected_hash {
                return Err(TapematchError::TamperDetected {
                    line: idx + 1,
                    reason: "hash mismatch".into(),
                });
            }
            expected_prev.clone_from(&record.hash);
        }

        tracing::debug!(records = records.len(), "command log chain verified");
        Ok(())
    }
}
