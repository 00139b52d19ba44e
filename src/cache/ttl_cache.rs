//! Thread-safe TTL cache
//!
//! Wraps [`CacheStore`] in a single lock together with a clock and an expiry
//! sink. Expiry is lazy: every `get` first reconciles deadlines against the
//! clock, and nothing runs in the background.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, CacheStore, Clock, ExpirySink, SystemClock};

/// Consistent view of the stored values and their average.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    pub values: HashMap<String, i64>,
    pub average: f64,
}

// == TTL Cache ==
/// Shared key-value cache with lazy expiry and a running average.
///
/// Map, average and counters sit behind one lock, so no reader ever sees a
/// key counted in the average but missing from the map, or the reverse.
pub struct TtlCache {
    store: RwLock<CacheStore>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn ExpirySink>,
}

impl TtlCache {
    /// Creates a cache reading the system clock.
    pub fn new(ttl_ms: u64, sink: Arc<dyn ExpirySink>) -> Self {
        Self::with_clock(ttl_ms, sink, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock.
    pub fn with_clock(ttl_ms: u64, sink: Arc<dyn ExpirySink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(CacheStore::new(ttl_ms)),
            clock,
            sink,
        }
    }

    // == Put ==
    /// Inserts or fully overwrites `key`, expiring `ttl_ms` after `timestamp_ms`.
    pub fn put(&self, key: impl Into<String>, value: i64, timestamp_ms: u64) -> CacheEntry {
        let key = key.into();
        debug!(key = %key, value, timestamp_ms, "put");
        self.store.write().put(key, value, timestamp_ms)
    }

    // == Get ==
    /// Reconciles expiry, then returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<i64> {
        let mut store = self.store.write();
        self.reconcile_locked(&mut store);
        let value = store.get(key);
        debug!(key = %key, found = value.is_some(), "get");
        value
    }

    // == Average ==
    /// Mean of stored values, 0.0 when empty.
    ///
    /// Does not reconcile: entries past their deadline still count until a
    /// `get` or `reconcile` evicts them.
    pub fn average(&self) -> f64 {
        self.store.read().average()
    }

    // == Reconcile ==
    /// Evicts every entry whose deadline has passed.
    ///
    /// Returns the number of entries evicted.
    pub fn reconcile(&self) -> usize {
        let mut store = self.store.write();
        self.reconcile_locked(&mut store)
    }

    fn reconcile_locked(&self, store: &mut CacheStore) -> usize {
        let now = self.clock.now_ms();
        let records = store.evict_expired(now);

        // Still under the lock, so the sink sees evictions in order.
        for record in &records {
            if let Err(e) = self.sink.record(record) {
                warn!(record = %record, error = %e, "failed to emit expired record");
            }
        }

        if !records.is_empty() {
            info!("Lazy expiry: removed {} expired entries", records.len());
        }
        records.len()
    }

    // == Stats ==
    /// Returns counters, live entry count and average, read under one lock.
    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }

    // == Snapshot ==
    /// Returns all stored values and their average, read under one lock.
    pub fn snapshot(&self) -> CacheSnapshot {
        let store = self.store.read();
        CacheSnapshot {
            values: store.values(),
            average: store.average(),
        }
    }

    /// Number of stored entries, including any not yet reconciled.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("store", &*self.store.read())
            .finish_non_exhaustive()
    }
}
