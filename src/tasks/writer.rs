//! Expiry Writer Task
//!
//! Background task that appends expired records to a file, one
//! `<key>-><value>` line per record.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::ExpiredRecord;
use crate::error::Result;

/// Spawns a task that drains `rx` into the file at `path`.
///
/// Writes are best-effort: a failed open or write is logged, the record is
/// dropped, and the file is reopened for the next record. The task ends once
/// every sender has been dropped.
///
/// # Example
/// ```ignore
/// let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
/// let writer = spawn_expiry_writer(rx, "expired-keys-store.txt");
/// let cache = TtlCache::new(DEFAULT_TTL_MS, Arc::new(ChannelSink::new(tx)));
/// // Later, after the cache is dropped:
/// writer.await?;
/// ```
pub fn spawn_expiry_writer(
    mut rx: UnboundedReceiver<ExpiredRecord>,
    path: impl Into<PathBuf>,
) -> JoinHandle<()> {
    let path = path.into();

    tokio::spawn(async move {
        info!("Starting expiry writer for {}", path.display());

        let mut file: Option<File> = None;
        let mut written: u64 = 0;

        while let Some(record) = rx.recv().await {
            if file.is_none() {
                match open_append(&path).await {
                    Ok(f) => file = Some(f),
                    Err(e) => {
                        warn!(record = %record, error = %e, "could not open expired-keys file");
                        continue;
                    }
                }
            }

            if let Some(f) = file.as_mut() {
                match write_record(f, &record).await {
                    Ok(()) => {
                        written += 1;
                        debug!(record = %record, "expired record written");
                    }
                    Err(e) => {
                        warn!(record = %record, error = %e, "failed to write expired record");
                        file = None;
                    }
                }
            }
        }

        info!("Expiry writer stopped after {} records", written);
    })
}

async fn open_append(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    Ok(file)
}

async fn write_record(file: &mut File, record: &ExpiredRecord) -> Result<()> {
    let line = format!("{}\n", record);
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    use crate::cache::{ChannelSink, ManualClock, TtlCache};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "expiring_kv_{}_{}_{}.txt",
            name,
            std::process::id(),
            crate::cache::current_timestamp_ms()
        ))
    }

    #[tokio::test]
    async fn test_writer_appends_lines() {
        let path = temp_path("append");
        std::fs::write(&path, "existing->0\n").unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_expiry_writer(rx, path.clone());

        tx.send(ExpiredRecord::new("a", 1)).unwrap();
        tx.send(ExpiredRecord::new("b", -2)).unwrap();
        drop(tx);
        handle.await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "existing->0\na->1\nb->-2\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_writer_survives_unwritable_path() {
        let path = temp_path("missing_dir").join("nested").join("out.txt");

        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_expiry_writer(rx, path.clone());

        tx.send(ExpiredRecord::new("a", 1)).unwrap();
        drop(tx);

        assert!(handle.await.is_ok(), "Writer should finish cleanly");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cache_evictions_reach_file() {
        let path = temp_path("cache");
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_expiry_writer(rx, path.clone());

        let clock = Arc::new(ManualClock::new(0));
        let cache = TtlCache::with_clock(100, Arc::new(ChannelSink::new(tx)), clock.clone());
        cache.put("x", 3, 0);
        cache.put("y", 4, 50);

        clock.set(101);
        assert_eq!(cache.get("y"), Some(4));
        clock.set(151);
        assert_eq!(cache.get("y"), None);

        drop(cache);
        handle.await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "x->3\ny->4\n");
        std::fs::remove_file(&path).unwrap();
    }
}
