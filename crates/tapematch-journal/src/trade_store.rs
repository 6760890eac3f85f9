//! CSV trade ledger.
//!
//! One line per executed trade:
//!
//! ```text
//! <buy_order_id>,<sell_order_id>,<price>,<quantity>,<rfc3339 timestamp>
//! ```
//!
//! The ledger is a convenience view, not a source of truth: boot recovery
//! clears it and rebuilds it from command replay. Appends are flushed to
//! disk before returning.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tapematch_types::{OrderId, Result, TapematchError, Trade};

/// Append-only CSV store of executed trades.
#[derive(Debug)]
pub struct FileTradeStore {
    path: PathBuf,
}

impl FileTradeStore {
    /// Create a store backed by `path`. The file is created lazily on the
    /// first [`save`](Self::save).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The ledger file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one trade and flush it to disk.
    pub fn save(&self, trade: &Trade) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serialize(trade);
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        Ok(())
    }

    /// Load every trade in the ledger, in file order.
    ///
    /// A missing file is an empty ledger. Blank lines are skipped; any
    /// malformed line fails the whole load with
    /// [`TapematchError::MalformedTrade`] carrying its 1-based line number.
    pub fn load_all(&self) -> Result<Vec<Trade>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let mut trades = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            trades.push(deserialize(line, idx + 1)?);
        }
        Ok(trades)
    }

    /// Truncate the ledger to empty. Creates the file if absent.
    pub fn clear(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        File::create(&self.path)?;
        Ok(())
    }
}

fn serialize(trade: &Trade) -> String {
    format!(
        "{},{},{},{},{}",
        trade.buy_order_id,
        trade.sell_order_id,
        trade.price,
        trade.quantity,
        trade.executed_at.to_rfc3339(),
    )
}

fn deserialize(line: &str, line_no: usize) -> Result<Trade> {
    let malformed = |reason: String| TapematchError::MalformedTrade {
        line: line_no,
        reason,
    };

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 5 {
        return Err(malformed(format!("expected 5 fields, got {}", parts.len())));
    }
    let buy_order_id: OrderId = parts[0]
        .parse()
        .map_err(|_| malformed(format!("bad buy order id: {}", parts[0])))?;
    let sell_order_id: OrderId = parts[1]
        .parse()
        .map_err(|_| malformed(format!("bad sell order id: {}", parts[1])))?;
    let price: u64 = parts[2]
        .parse()
        .map_err(|_| malformed(format!("bad price: {}", parts[2])))?;
    let quantity: u64 = parts[3]
        .parse()
        .map_err(|_| malformed(format!("bad quantity: {}", parts[3])))?;
    let executed_at = DateTime::parse_from_rfc3339(parts[4])
        .map(DateTime::<Utc>::from)
        .map_err(|e| malformed(format!("bad timestamp: {e}")))?;

    Trade::with_timestamp(buy_order_id, sell_order_id, price, quantity, executed_at)
        .map_err(|e| malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileTradeStore {
        FileTradeStore::new(dir.path().join("trades.csv"))
    }

    fn trade(price: u64, qty: u64) -> Trade {
        Trade::new(OrderId::new(), OrderId::new(), price, qty).unwrap()
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let t1 = trade(100, 3);
        let t2 = trade(101, 1);
        store.save(&t1).unwrap();
        store.save(&t2).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].buy_order_id, t1.buy_order_id);
        assert_eq!(loaded[0].price, 100);
        assert_eq!(loaded[1].quantity, 1);
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = FileTradeStore::new(dir.path().join("nested/deeper/trades.csv"));
        store.save(&trade(100, 1)).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&trade(100, 2)).unwrap();
        let mut contents = std::fs::read_to_string(store.path()).unwrap();
        contents.push('\n');
        std::fs::write(store.path(), contents).unwrap();

        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&trade(100, 2)).unwrap();
        let mut contents = std::fs::read_to_string(store.path()).unwrap();
        contents.push_str("only,four,fields,here\n");
        std::fs::write(store.path(), contents).unwrap();

        let err = store.load_all().unwrap_err();
        assert!(matches!(err, TapematchError::MalformedTrade { line: 2, .. }));
    }

    #[test]
    fn bad_price_is_malformed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let bad = format!(
            "{},{},not-a-number,2,{}",
            OrderId::new(),
            OrderId::new(),
            Utc::now().to_rfc3339(),
        );
        std::fs::write(dir.path().join("trades.csv"), format!("{bad}\n")).unwrap();

        let err = store.load_all().unwrap_err();
        assert!(matches!(err, TapematchError::MalformedTrade { line: 1, .. }));
    }

    #[test]
    fn clear_truncates() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&trade(100, 2)).unwrap();
        store.save(&trade(101, 4)).unwrap();
        store.clear().unwrap();
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.path().exists());
    }
}
