//! Cache Entry Module
//!
//! Defines the record stored per key: the value and its expiry deadline.

use std::time::{SystemTime, UNIX_EPOCH};

/// Default time-to-live added to every insertion timestamp (6h 40m).
pub const DEFAULT_TTL_MS: u64 = 24_000_000;

// == Cache Entry ==
/// Represents a single cache entry with its value and deadline.
///
/// Value and deadline live in one record so a key can never carry one
/// without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: i64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry inserted at `timestamp_ms`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `timestamp_ms` - Caller-supplied insertion time (Unix milliseconds)
    /// * `ttl_ms` - Time-to-live in milliseconds
    pub fn new(value: i64, timestamp_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            expires_at: timestamp_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now_ms`.
    ///
    /// Boundary condition: the entry is still live when `now_ms` equals the
    /// deadline; it expires only once the deadline has been passed.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
