//! Dashcache - a multi-tier read-through cache for dashboard workloads
//!
//! Provides read-through page caching with TTL expiry, per-entity panel
//! memoization, cross-cache invalidation and an embeddable admin API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod invalidate;
pub mod models;
pub mod tasks;

pub use api::{create_admin_router, AppState};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use invalidate::{Invalidator, ManagedCache, SharedCache};
pub use tasks::spawn_sweep_task;
