//! Response DTOs for the cache admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the flush endpoints (POST /flush, POST /flush/:entity_id)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
    /// Entity the flush targeted, absent for a full reset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Number of cache instances the flush touched
    pub caches: usize,
}

impl FlushResponse {
    /// Response for a full cache reset.
    pub fn all(caches: usize) -> Self {
        Self {
            message: "all caches cleared".to_string(),
            entity_id: None,
            caches,
        }
    }

    /// Response for a per-entity invalidation.
    pub fn entity(entity_id: impl Into<String>, caches: usize) -> Self {
        let entity_id = entity_id.into();
        Self {
            message: format!("cached state for '{}' invalidated", entity_id),
            entity_id: Some(entity_id),
            caches,
        }
    }
}

/// Counters for one cache instance within the stats response
#[derive(Debug, Clone, Serialize)]
pub struct ScopeStats {
    /// Cache label ("users", "user_panels", ...)
    pub scope: String,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl ScopeStats {
    pub fn new(scope: String, stats: &CacheStats) -> Self {
        Self {
            scope,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// One entry per registered cache instance
    pub caches: Vec<ScopeStats>,
    /// Snapshot timestamp in ISO 8601 format
    pub generated_at: String,
}

impl StatsResponse {
    /// Builds the response from labelled per-cache counters.
    pub fn new(stats: Vec<(String, CacheStats)>) -> Self {
        Self {
            caches: stats
                .into_iter()
                .map(|(scope, stats)| ScopeStats::new(scope, &stats))
                .collect(),
            generated_at: chrono::Utc::now().to_rfc3339(),
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
    /// Creates a new HealthResponse with the current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
