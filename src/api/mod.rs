//! API Module
//!
//! The embeddable HTTP admin surface: flush, per-entity flush, stats and
//! health endpoints over the registered caches.

mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::create_admin_router;
