//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tokio::sync::Semaphore;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Values are read once at startup and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of rendered components the cache can hold
    pub cache_capacity: usize,
    /// Seconds a cached component stays valid after it was stored
    pub cache_ttl: u64,
    /// Maximum number of requests processed at once
    pub concurrency_limit: usize,
    /// Milliseconds a request may wait for a slot, None = wait indefinitely
    pub acquire_timeout_ms: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached components (default: 50)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 600)
    /// - `CONCURRENCY_LIMIT` - Concurrent requests, positive and at most
    ///   `Semaphore::MAX_PERMITS` (default: 2)
    /// - `ACQUIRE_TIMEOUT_MS` - Wait limit for a request slot (default: unset)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: parse_env("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            cache_ttl: parse_env("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            concurrency_limit: parse_env::<usize>("CONCURRENCY_LIMIT")
                .filter(|limit| *limit > 0 && *limit <= Semaphore::MAX_PERMITS)
                .unwrap_or(defaults.concurrency_limit),
            acquire_timeout_ms: parse_env("ACQUIRE_TIMEOUT_MS").or(defaults.acquire_timeout_ms),
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Acquire timeout as a Duration.
    pub fn acquire_timeout(&self) -> Option<Duration> {
        self.acquire_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 50,
            cache_ttl: 600,
            concurrency_limit: 2,
            acquire_timeout_ms: None,
            server_port: 8000,
        }
    }
}

/// Reads and parses an environment variable, None if unset or malformed.
fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
