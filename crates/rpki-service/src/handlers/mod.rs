//! API handlers.

pub mod health;
pub mod records;

use axum::http::Uri;

use crate::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
