//! API route handlers
//!
//! - `anchor`: anchor CRUD, mounted under `/anchor`
//! - `health`: liveness, readiness and metrics

pub mod anchor;
pub mod health;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Root endpoint (GET /).
///
/// # Response
///
/// ```json
/// {
///   "name": "Anchor Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Anchor Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /anchor/create",
            "GET /anchor/{anchorId}",
            "POST /anchor/getAnchorsById",
            "GET /anchor/getByNodeId/{nodeId}",
            "DELETE /anchor/{anchorId}",
            "POST /anchor/delete",
            "GET /health",
            "GET /ready",
            "GET /metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
