//! Cache Statistics Module
//!
//! Write and expiry counters, reported together with the live entry count
//! and running average they were read alongside.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of the store.
///
/// Produced under a single lock, so `live_entries` and `average` always
/// describe the same set of keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of `put` calls
    pub puts: u64,
    /// Number of `put` calls that replaced an existing key
    pub overwrites: u64,
    /// Number of entries evicted by lazy expiry
    pub expirations: u64,
    /// Entries currently stored, including any not yet reconciled
    pub live_entries: usize,
    /// Mean of stored values, 0.0 when empty
    pub average: f64,
}

impl CacheStats {
    /// Creates a CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Put ==
    /// Counts a put, and an overwrite when the key was already present.
    pub fn record_put(&mut self, overwrote: bool) {
        self.puts += 1;
        if overwrote {
            self.overwrites += 1;
        }
    }

    // == Record Expiration ==
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.puts, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.live_entries, 0);
        assert_eq!(stats.average, 0.0);
    }

    #[test]
    fn test_record_put_counts_overwrites() {
        let mut stats = CacheStats::new();
        stats.record_put(false);
        stats.record_put(true);
        stats.record_put(false);

        assert_eq!(stats.puts, 3);
        assert_eq!(stats.overwrites, 1);
    }

    #[test]
    fn test_record_expiration() {
        let mut stats = CacheStats::new();
        stats.record_expiration();
        stats.record_expiration();
        assert_eq!(stats.expirations, 2);
    }
}
