use anyhow::{bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Key-value log operation types
#[derive(Debug, Clone, PartialEq)]
pub enum WalOperation {
    Set { key: String, value: String },
    Delete { key: String },
}

impl WalOperation {
    // Keys and values are hex-encoded so that `|` and newlines in JSON
    // payloads or date keys never break the line format.
    fn to_line(&self) -> String {
        match self {
            WalOperation::Set { key, value } => {
                format!("SET|{}|{}", hex::encode(key), hex::encode(value))
            }
            WalOperation::Delete { key } => format!("DEL|{}", hex::encode(key)),
        }
    }

    fn from_line(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split('|').collect();

        match parts.first() {
            Some(&"SET") => {
                if parts.len() != 3 {
                    bail!("Invalid SET format");
                }
                let key = decode_text(parts[1]).context("Invalid key hex")?;
                let value = decode_text(parts[2]).context("Invalid value hex")?;

                Ok(WalOperation::Set { key, value })
            }
            Some(&"DEL") => {
                if parts.len() != 2 {
                    bail!("Invalid DEL format");
                }
                let key = decode_text(parts[1]).context("Invalid key hex")?;

                Ok(WalOperation::Delete { key })
            }
            _ => bail!("Unknown operation type"),
        }
    }
}

fn decode_text(field: &str) -> Result<String> {
    let bytes = hex::decode(field)?;
    String::from_utf8(bytes).context("Field is not valid UTF-8")
}

pub struct Wal {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl Wal {
    pub fn new(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open key-value log")?;

        Ok(Wal {
            file: Arc::new(Mutex::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, File> {
        self.file.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn log_operation(&self, op: WalOperation) -> Result<()> {
        let line = op.to_line();
        let mut file = self.lock();
        writeln!(file, "{}", line).context("Failed to write to key-value log")?;
        file.flush().context("Failed to flush key-value log")?;
        Ok(())
    }

    pub fn replay(&self) -> Result<Vec<WalOperation>> {
        let file = File::open(&self.path).context("Failed to open key-value log for replay")?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.context("Failed to read line from key-value log")?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            match WalOperation::from_line(line) {
                Ok(op) => operations.push(op),
                Err(e) => {
                    tracing::warn!(
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse key-value log line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }

    /// Replace the log contents with `operations`, written to a sibling
    /// file first and renamed over the original.
    pub fn rewrite(&self, operations: &[WalOperation]) -> Result<()> {
        let mut file = self.lock();

        let tmp_path = self.path.with_extension("compact");
        {
            let mut tmp = File::create(&tmp_path).context("Failed to create compaction file")?;
            for op in operations {
                writeln!(tmp, "{}", op.to_line()).context("Failed to write compaction file")?;
            }
            tmp.sync_all().context("Failed to sync compaction file")?;
        }

        std::fs::rename(&tmp_path, &self.path).context("Failed to replace key-value log")?;

        *file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .context("Failed to reopen key-value log")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_line_round_trip_escapes_separators() {
        let op = WalOperation::Set {
            key: "clock-Mon Oct 19 2026".to_string(),
            value: "{\"a\":\"x|y\"}\n".to_string(),
        };
        let line = op.to_line();
        assert!(line.starts_with("SET|"));
        assert_eq!(line.matches('|').count(), 2);
        assert!(!line.contains('\n'));
        assert_eq!(WalOperation::from_line(&line).unwrap(), op);

        let op = WalOperation::Delete {
            key: "clock-Mon Oct 19 2026".to_string(),
        };
        assert_eq!(WalOperation::from_line(&op.to_line()).unwrap(), op);
    }

    #[test]
    fn test_wal_log_and_replay() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.kv");

        let wal = Wal::new(wal_path).unwrap();

        wal.log_operation(WalOperation::Set {
            key: "a".to_string(),
            value: "1".to_string(),
        })
        .unwrap();
        wal.log_operation(WalOperation::Set {
            key: "b".to_string(),
            value: "2".to_string(),
        })
        .unwrap();
        wal.log_operation(WalOperation::Delete { key: "a".to_string() })
            .unwrap();

        let operations = wal.replay().unwrap();
        assert_eq!(operations.len(), 3);

        match &operations[2] {
            WalOperation::Delete { key } => assert_eq!(key, "a"),
            _ => panic!("Expected Delete"),
        }
    }

    #[test]
    fn test_wal_rewrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.kv");
        let wal = Wal::new(wal_path).unwrap();

        for i in 0..5 {
            wal.log_operation(WalOperation::Set {
                key: "k".to_string(),
                value: i.to_string(),
            })
            .unwrap();
        }

        wal.rewrite(&[WalOperation::Set {
            key: "k".to_string(),
            value: "4".to_string(),
        }])
        .unwrap();
        assert_eq!(wal.replay().unwrap().len(), 1);

        // Appends after a rewrite land in the new file
        wal.log_operation(WalOperation::Delete { key: "k".to_string() })
            .unwrap();
        assert_eq!(wal.replay().unwrap().len(), 2);
    }

    #[test]
    fn test_rewrite_with_nothing_empties_log() {
        let temp_dir = TempDir::new().unwrap();
        let wal = Wal::new(temp_dir.path().join("test.kv")).unwrap();

        wal.log_operation(WalOperation::Set {
            key: "k".to_string(),
            value: "v".to_string(),
        })
        .unwrap();
        assert_eq!(wal.replay().unwrap().len(), 1);

        wal.rewrite(&[]).unwrap();
        assert_eq!(wal.replay().unwrap().len(), 0);
    }

    #[test]
    fn test_wal_invalid_lines() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.kv");

        fs::write(&wal_path, "INVALID_OP|data\nSET|6b|76\nDEL|zz\n").unwrap();

        let wal = Wal::new(wal_path).unwrap();
        let operations = wal.replay().unwrap();

        // Should skip invalid lines and parse the valid one
        assert_eq!(operations.len(), 1);
        assert_eq!(
            operations[0],
            WalOperation::Set {
                key: "k".to_string(),
                value: "v".to_string()
            }
        );
    }
}
