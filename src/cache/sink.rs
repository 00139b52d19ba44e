//! Expiry Sink Module
//!
//! Destinations for records of entries removed by lazy expiry.

use std::fmt;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{CacheError, Result};

// == Expired Record ==
/// A key and the value it held when it expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiredRecord {
    pub key: String,
    pub value: i64,
}

impl ExpiredRecord {
    pub fn new(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Formats as `<key>-><value>`, the line format of the expired-keys file.
impl fmt::Display for ExpiredRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.key, self.value)
    }
}

// == Sink Trait ==
/// Receives one record per eviction, in eviction order.
///
/// Called while the cache lock is held, so implementations must not block.
/// A returned error is logged by the caller; the eviction stands regardless.
pub trait ExpirySink: Send + Sync {
    fn record(&self, record: &ExpiredRecord) -> Result<()>;
}

// == Channel Sink ==
/// Forwards records to an async consumer over an unbounded channel.
///
/// Pair with [`spawn_expiry_writer`](crate::tasks::spawn_expiry_writer) to
/// persist them.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<ExpiredRecord>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<ExpiredRecord>) -> Self {
        Self { tx }
    }
}

impl ExpirySink for ChannelSink {
    fn record(&self, record: &ExpiredRecord) -> Result<()> {
        self.tx
            .send(record.clone())
            .map_err(|_| CacheError::SinkClosed)
    }
}

// == Memory Sink ==
/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ExpiredRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records received so far.
    pub fn records(&self) -> Vec<ExpiredRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl ExpirySink for MemorySink {
    fn record(&self, record: &ExpiredRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
