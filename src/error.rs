//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::PanelKind;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing fetch failed during a read-through miss
    #[error("backing fetch failed for '{scope}' page {page_index}: {cause}")]
    Fetch {
        scope: String,
        page_index: usize,
        cause: String,
    },

    /// Panel renderer failed on a cache miss
    #[error("render failed for '{kind}' panel of entity '{entity_id}': {cause}")]
    Render {
        kind: PanelKind,
        entity_id: String,
        cause: String,
    },

    /// No renderer registered for the requested panel kind
    #[error("no renderer registered for panel kind '{0}'")]
    RendererMissing(PanelKind),

    /// Invalid request data
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid cache configuration, fatal at construction time
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            CacheError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::RendererMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
