//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheStats, ResourceType};
use crate::coordinator::{Loaded, Source};
use crate::models::{Payload, SearchKind, Suggestion};

/// Response body for every company data endpoint
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    /// Canonical cache key the data is stored under
    pub key: String,
    pub resource: ResourceType,
    /// Whether the data was already cached or fetched for this request
    pub source: Source,
    pub fetched_at: DateTime<Utc>,
    /// Milliseconds since the data was fetched
    pub age_ms: i64,
    pub data: Payload,
}

impl From<Loaded> for DataResponse {
    fn from(loaded: Loaded) -> Self {
        Self {
            key: loaded.key.to_string(),
            resource: loaded.key.resource(),
            source: loaded.source,
            fetched_at: loaded.entry.fetched_at,
            age_ms: loaded.entry.age_ms(),
            data: loaded.entry.payload.clone(),
        }
    }
}

/// Response body for the search endpoint (GET /search/:kind)
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub kind: SearchKind,
    pub query: String,
    pub results: Vec<Suggestion>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Responses written to the cache
    pub stores: u64,
    /// Backend fetches issued
    pub fetches: u64,
    /// Backend fetches that failed
    pub failures: u64,
    /// Requests that joined an in-flight fetch
    pub joined: u64,
    /// Fetch results discarded as superseded
    pub superseded: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stores: stats.stores,
            fetches: stats.fetches,
            failures: stats.failures,
            joined: stats.joined,
            superseded: stats.superseded,
            total_entries: stats.total_entries,
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

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
