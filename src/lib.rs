//! Expiring KV - An in-memory key-value store with lazy TTL expiry
//!
//! Keeps a running average of live values and hands every expired entry to
//! an append-only sink.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use tasks::spawn_expiry_writer;
