//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{CacheError, Result};
use crate::invalidate::Invalidator;
use crate::models::{FlushResponse, HealthResponse, StatsResponse};

/// Application state shared across all admin handlers.
///
/// Holds the process-wide invalidator; each registered cache stays behind
/// its own Arc<RwLock<>>, so handlers never contend on one global lock.
#[derive(Clone)]
pub struct AppState {
    /// Registry of every cache instance in the process
    pub invalidator: Invalidator,
}

impl AppState {
    /// Creates a new AppState around an invalidator with the caches
    /// already registered.
    pub fn new(invalidator: Invalidator) -> Self {
        Self { invalidator }
    }
}

/// Handler for POST /flush
///
/// Empties every registered cache.
pub async fn flush_all_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    state.invalidator.invalidate_all().await;

    Json(FlushResponse::all(state.invalidator.cache_count()))
}

/// Handler for POST /flush/:entity_id
///
/// Drops cached state for one entity across all registered caches.
pub async fn flush_entity_handler(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> Result<Json<FlushResponse>> {
    if entity_id.trim().is_empty() {
        return Err(CacheError::InvalidRequest(
            "entity_id cannot be empty".to_string(),
        ));
    }

    state.invalidator.invalidate_entity(&entity_id).await;

    Ok(Json(FlushResponse::entity(
        entity_id,
        state.invalidator.cache_count(),
    )))
}

/// Handler for GET /stats
///
/// Returns per-cache hit/miss/eviction counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.invalidator.stats().await;

    Json(StatsResponse::new(stats))
}

/// Handler for GET /health
///
/// Returns health status of the cache layer.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
