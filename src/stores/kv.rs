use crate::core::error::StorageError;
use crate::wal::wal::{Wal, WalOperation};
use anyhow::{Context, Result};
use dashmap::DashMap;
use std::path::PathBuf;

/// String key-value storage used for the only durable console state.
///
/// Writes are last-writer-wins; there is no versioning or conflict detection.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Returns whether a value was present
    fn delete(&self, key: &str) -> Result<bool, StorageError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Volatile store, lost on restart
pub struct MemoryKv {
    entries: DashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// In-memory map backed by an append-only log on disk.
///
/// Every mutation is appended to the log before the map is updated, and the
/// map is rebuilt by replaying the log on open.
pub struct LogKv {
    entries: DashMap<String, String>,
    wal: Wal,
}

impl LogKv {
    pub fn open(path: PathBuf) -> Result<Self> {
        let wal = Wal::new(path).context("Failed to open key-value log")?;
        let operations = wal.replay().context("Failed to replay key-value log")?;

        let entries = DashMap::new();
        for op in &operations {
            match op {
                WalOperation::Set { key, value } => {
                    entries.insert(key.clone(), value.clone());
                }
                WalOperation::Delete { key } => {
                    entries.remove(key);
                }
            }
        }

        tracing::info!(
            path = %wal.path().display(),
            operations_replayed = operations.len(),
            live_keys = entries.len(),
            "Key-value log replayed"
        );

        Ok(Self { entries, wal })
    }

    /// Rewrite the log so it holds one SET per live key
    pub fn compact(&self) -> Result<usize> {
        let mut operations: Vec<WalOperation> = self
            .entries
            .iter()
            .map(|entry| WalOperation::Set {
                key: entry.key().clone(),
                value: entry.value().clone(),
            })
            .collect();
        operations.sort_by(|a, b| match (a, b) {
            (WalOperation::Set { key: ka, .. }, WalOperation::Set { key: kb, .. }) => ka.cmp(kb),
            _ => std::cmp::Ordering::Equal,
        });

        self.wal.rewrite(&operations)?;
        Ok(operations.len())
    }
}

impl KvStore for LogKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.wal.log_operation(WalOperation::Set {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(false);
        }
        self.wal.log_operation(WalOperation::Delete {
            key: key.to_string(),
        })?;
        Ok(self.entries.remove(key).is_some())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_kv_basic_operations() {
        let kv = MemoryKv::new();
        assert!(kv.is_empty());

        kv.set("a", "1").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));

        kv.set("a", "2").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(kv.len(), 1);

        assert!(kv.delete("a").unwrap());
        assert!(!kv.delete("a").unwrap());
        assert_eq!(kv.get("a").unwrap(), None);
    }

    #[test]
    fn test_log_kv_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.kv");

        {
            let kv = LogKv::open(path.clone()).unwrap();
            kv.set("clock-Mon Oct 19 2026", "{\"status\":\"clocked-in\"}").unwrap();
            kv.set("clock-Mon Oct 19 2026", "{\"status\":\"clocked-out\"}").unwrap();
            kv.set("temp", "x").unwrap();
            kv.delete("temp").unwrap();
        }

        let kv = LogKv::open(path).unwrap();
        assert_eq!(kv.len(), 1);
        assert_eq!(
            kv.get("clock-Mon Oct 19 2026").unwrap().as_deref(),
            Some("{\"status\":\"clocked-out\"}")
        );
        assert_eq!(kv.get("temp").unwrap(), None);
    }

    #[test]
    fn test_log_kv_compaction_keeps_live_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.kv");

        let kv = LogKv::open(path.clone()).unwrap();
        for i in 0..10 {
            kv.set("k", &i.to_string()).unwrap();
        }
        kv.set("other", "v").unwrap();

        assert_eq!(kv.compact().unwrap(), 2);
        drop(kv);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);

        let kv = LogKv::open(path).unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("9"));
        assert_eq!(kv.get("other").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_delete_of_missing_key_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.kv");

        let kv = LogKv::open(path.clone()).unwrap();
        assert!(!kv.delete("missing").unwrap());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.is_empty());
    }
}
