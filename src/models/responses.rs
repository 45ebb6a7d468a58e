//! Response DTOs for the component server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::sync::Arc;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::render::RenderedArtifact;
use crate::service::Fetched;

/// Response body for GET /api/component/:component_type
///
/// The artifact fields are flattened next to the `cached` flag. The
/// artifact is shared with the cache, not copied.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentResponse {
    #[serde(flatten)]
    pub artifact: Arc<RenderedArtifact>,
    /// True when served from the cache
    pub cached: bool,
}

impl From<Fetched> for ComponentResponse {
    fn from(fetched: Fetched) -> Self {
        Self {
            artifact: fetched.artifact,
            cached: fetched.cache_hit,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    pub service: String,
    pub version: String,
    /// Entries currently held by the component cache
    pub cache_size: usize,
    /// Configured maximum of concurrent requests
    pub concurrency_limit: usize,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache_size: usize, concurrency_limit: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            cache_size,
            concurrency_limit,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Requests currently inside the concurrency gate
    pub in_flight: usize,
    pub concurrency_limit: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics and a gate snapshot
    pub fn new(stats: &CacheStats, in_flight: usize, concurrency_limit: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            in_flight,
            concurrency_limit,
        }
    }
}

/// Response body for DELETE /api/cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Number of entries dropped
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cleared {} cached components", removed),
            removed,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Valid component types, included when the requested one is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_components: Option<Vec<String>>,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            available_components: None,
        }
    }

    /// Creates an ErrorResponse listing the valid component types
    pub fn with_available(error: impl Into<String>, available: Vec<String>) -> Self {
        Self {
            error: error.into(),
            available_components: Some(available),
        }
    }
}
