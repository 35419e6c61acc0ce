//! Response models for the cache admin API

mod responses;

pub use responses::{FlushResponse, HealthResponse, ScopeStats, StatsResponse};
