//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration and a running average
//! of live values.

mod average;
mod clock;
mod entry;
mod sink;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use average::RunningAverage;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{current_timestamp_ms, CacheEntry, DEFAULT_TTL_MS};
pub use sink::{ChannelSink, ExpiredRecord, ExpirySink, MemorySink};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl_cache::{CacheSnapshot, TtlCache};
