use axum::http::Uri;

use crate::error::{AppError, AppResult};

/// Router fallback: any path without a route answers 404 with the JSON error
/// envelope.
pub async fn not_found(uri: Uri) -> AppResult<()> {
    tracing::debug!(path = %uri.path(), "No route for request");
    Err(AppError::NotFound(format!("No route for {}", uri.path())))
}
