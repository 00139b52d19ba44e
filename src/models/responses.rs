//! Response DTOs for the store API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: i64,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the PUT operation (PUT /put)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
    /// Deadline of the stored entry (Unix milliseconds)
    pub expires_at: u64,
}

impl PutResponse {
    /// Creates a new PutResponse
    pub fn new(key: impl Into<String>, expires_at: u64) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' stored successfully", key),
            key,
            expires_at,
        }
    }
}

/// Response body for the average endpoint (GET /average)
#[derive(Debug, Clone, Serialize)]
pub struct AverageResponse {
    /// Mean of stored values
    pub average: f64,
    /// Number of entries contributing to the mean
    pub live_keys: usize,
}

impl From<&CacheStats> for AverageResponse {
    fn from(stats: &CacheStats) -> Self {
        Self {
            average: stats.average,
            live_keys: stats.live_entries,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of puts
    pub puts: u64,
    /// Puts that replaced an existing key
    pub overwrites: u64,
    /// Number of entries removed by lazy expiry
    pub expirations: u64,
    /// Current number of entries in cache
    pub live_entries: usize,
    /// Mean of stored values
    pub average: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            puts: stats.puts,
            overwrites: stats.overwrites,
            expirations: stats.expirations,
            live_entries: stats.live_entries,
            average: stats.average,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
