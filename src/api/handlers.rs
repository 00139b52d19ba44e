//! API Handlers
//!
//! HTTP request handlers for each store endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{current_timestamp_ms, ChannelSink, ExpirySink, TtlCache};
use crate::error::{CacheError, Result};
use crate::models::{
    AverageResponse, GetResponse, HealthResponse, PutRequest, PutResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache does its own locking, so handlers share it through a plain Arc.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache
    pub cache: Arc<TtlCache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: TtlCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Expired records are forwarded to `sink`.
    pub fn from_config(config: &crate::config::Config, sink: ChannelSink) -> Self {
        let sink: Arc<dyn ExpirySink> = Arc::new(sink);
        Self::new(TtlCache::new(config.ttl_ms, sink))
    }
}

/// Handler for PUT /put
///
/// Stores a key-value pair, stamped with the request's timestamp or the
/// current server time.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Json<PutResponse> {
    let timestamp = req.timestamp.unwrap_or_else(current_timestamp_ms);
    let entry = state.cache.put(req.key.clone(), req.value, timestamp);

    Json(PutResponse::new(req.key, entry.expires_at))
}

/// Handler for GET /get/:key
///
/// Reconciles expiry, then retrieves a value by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /average
///
/// Returns the running average without reconciling expiry.
pub async fn average_handler(State(state): State<AppState>) -> Json<AverageResponse> {
    let stats = state.cache.stats();

    Json(AverageResponse::from(&stats))
}

/// Handler for GET /stats
///
/// Entry count and average come from the same read of the cache.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemorySink};

    fn test_state() -> (AppState, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let cache = TtlCache::with_clock(1_000, Arc::new(MemorySink::new()), clock.clone());
        (AppState::new(cache), clock)
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let (state, _clock) = test_state();

        let req = PutRequest {
            key: "test_key".to_string(),
            value: 11,
            timestamp: Some(0),
        };
        let response = put_handler(State(state.clone()), Json(req)).await;
        assert_eq!(response.expires_at, 1_000);

        let result = get_handler(State(state.clone()), Path("test_key".to_string())).await;
        let response = result.unwrap();
        assert_eq!(response.value, 11);
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let (state, _clock) = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_expired_key() {
        let (state, clock) = test_state();

        let req = PutRequest {
            key: "k".to_string(),
            value: 1,
            timestamp: Some(0),
        };
        let _response = put_handler(State(state.clone()), Json(req)).await;
        clock.set(1_001);

        let result = get_handler(State(state), Path("k".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_average_handler() {
        let (state, _clock) = test_state();
        for (key, value) in [("a", 1), ("b", 2)] {
            let req = PutRequest {
                key: key.to_string(),
                value,
                timestamp: Some(0),
            };
            let _response = put_handler(State(state.clone()), Json(req)).await;
        }

        let response = average_handler(State(state)).await;
        assert_eq!(response.average, 1.5);
        assert_eq!(response.live_keys, 2);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _clock) = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.puts, 0);
        assert_eq!(response.live_entries, 0);
        assert_eq!(response.average, 0.0);
    }

    #[tokio::test]
    async fn test_stats_handler_after_expiry() {
        let (state, clock) = test_state();
        for (key, value, timestamp) in [("a", 1, 0), ("b", 2, 500)] {
            let req = PutRequest {
                key: key.to_string(),
                value,
                timestamp: Some(timestamp),
            };
            let _response = put_handler(State(state.clone()), Json(req)).await;
        }
        clock.set(1_001);
        state.cache.reconcile();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.puts, 2);
        assert_eq!(response.expirations, 1);
        assert_eq!(response.live_entries, 1);
        assert_eq!(response.average, 2.0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
