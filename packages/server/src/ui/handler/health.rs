//! Health check and fallback endpoints.

use axum::Json;

use crate::ui::error::{ApiError, NOT_FOUND};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::not_found(NOT_FOUND)
}
