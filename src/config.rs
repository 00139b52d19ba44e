//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::DEFAULT_TTL_MS;

/// Default file that receives expired records.
pub const DEFAULT_EXPIRED_KEYS_PATH: &str = "expired-keys-store.txt";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in milliseconds added to each insertion timestamp
    pub ttl_ms: u64,
    /// File that expired records are appended to
    pub expired_keys_path: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `TTL_MS` - Entry TTL in milliseconds (default: 24000000)
    /// - `EXPIRED_KEYS_PATH` - Expired-record file (default: expired-keys-store.txt)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            ttl_ms: env::var("TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            expired_keys_path: env::var("EXPIRED_KEYS_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPIRED_KEYS_PATH)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            ttl_ms: DEFAULT_TTL_MS,
            expired_keys_path: PathBuf::from(DEFAULT_EXPIRED_KEYS_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.ttl_ms, 24_000_000);
        assert_eq!(
            config.expired_keys_path,
            PathBuf::from("expired-keys-store.txt")
        );
    }

    // Both cases share one test so they never race on the process environment.
    #[test]
    fn test_config_from_env() {
        env::remove_var("SERVER_PORT");
        env::remove_var("TTL_MS");
        env::remove_var("EXPIRED_KEYS_PATH");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.ttl_ms, DEFAULT_TTL_MS);
        assert_eq!(
            config.expired_keys_path,
            PathBuf::from(DEFAULT_EXPIRED_KEYS_PATH)
        );

        env::set_var("SERVER_PORT", "8080");
        env::set_var("TTL_MS", "abc");
        env::set_var("EXPIRED_KEYS_PATH", "/tmp/expired.txt");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.ttl_ms, DEFAULT_TTL_MS, "Unparseable TTL falls back");
        assert_eq!(config.expired_keys_path, PathBuf::from("/tmp/expired.txt"));

        env::set_var("TTL_MS", "5000");
        env::set_var("EXPIRED_KEYS_PATH", "");
        let config = Config::from_env();
        assert_eq!(config.ttl_ms, 5_000);
        assert_eq!(
            config.expired_keys_path,
            PathBuf::from(DEFAULT_EXPIRED_KEYS_PATH)
        );

        env::remove_var("SERVER_PORT");
        env::remove_var("TTL_MS");
        env::remove_var("EXPIRED_KEYS_PATH");
    }
}
