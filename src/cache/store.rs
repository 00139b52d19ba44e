//! Cache Store Module
//!
//! Single-threaded engine: HashMap storage, lazy TTL expiry, and the running
//! average of live values. [`TtlCache`](crate::cache::TtlCache) wraps it for
//! shared use.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, ExpiredRecord, RunningAverage};

// == Cache Store ==
/// Key-value storage with TTL deadlines and a running average.
///
/// Every mutation updates the map and the average together, so the average
/// always equals the mean of the values currently stored.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage with deadlines
    entries: HashMap<String, CacheEntry>,
    /// Mean of stored values
    average: RunningAverage,
    /// Write and expiry counters
    stats: CacheStats,
    /// TTL in milliseconds added to each insertion timestamp
    ttl_ms: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore.
    ///
    /// # Arguments
    /// * `ttl_ms` - TTL in milliseconds added to every insertion timestamp
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            average: RunningAverage::new(),
            stats: CacheStats::new(),
            ttl_ms,
        }
    }

    // == Put ==
    /// Stores a key-value pair inserted at `timestamp_ms`.
    ///
    /// If the key already exists, its old value is taken out of the average
    /// before the new one is added, and its deadline is reset.
    ///
    /// Returns the new entry.
    pub fn put(&mut self, key: String, value: i64, timestamp_ms: u64) -> CacheEntry {
        let entry = CacheEntry::new(value, timestamp_ms, self.ttl_ms);

        let previous = self.entries.insert(key, entry);
        if let Some(previous) = previous {
            self.average.remove(previous.value);
        }
        self.average.add(value);

        self.stats.record_put(previous.is_some());
        entry
    }

    // == Get ==
    /// Looks up a value by key without reconciling expiry.
    ///
    /// Callers run [`evict_expired`](Self::evict_expired) first.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries.get(key).map(|entry| entry.value)
    }

    // == Evict Expired ==
    /// Removes every entry whose deadline is before `now_ms`.
    ///
    /// All entries are judged against the same `now_ms`. Returns one record
    /// per removed entry, in removal order.
    pub fn evict_expired(&mut self, now_ms: u64) -> Vec<ExpiredRecord> {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        let mut records = Vec::with_capacity(expired_keys.len());
        for key in expired_keys {
            if let Some(entry) = self.entries.remove(&key) {
                self.average.remove(entry.value);
                self.stats.record_expiration();
                debug!(key = %key, value = entry.value, "entry expired");
                records.push(ExpiredRecord::new(key, entry.value));
            }
        }

        records
    }

    // == Average ==
    /// Mean of stored values, 0.0 when empty.
    ///
    /// Includes entries past their deadline that have not been evicted yet.
    pub fn average(&self) -> f64 {
        self.average.value()
    }

    // == Stats ==
    /// Returns counters together with the live entry count and average.
    pub fn stats(&self) -> CacheStats {
        debug_assert_eq!(
            self.average.count() as usize,
            self.entries.len(),
            "running average out of step with stored entries"
        );

        CacheStats {
            live_entries: self.entries.len(),
            average: self.average.value(),
            ..self.stats.clone()
        }
    }

    /// Copies out every stored key and value.
    pub fn values(&self) -> HashMap<String, i64> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value))
            .collect()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
