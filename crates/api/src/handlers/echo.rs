//! The echo responder.
//!
//! Reads the whole request body, decodes it leniently and answers with the
//! fixed [`ResponseDocument`]. Every outcome is `200 OK` with a JSON body:
//! an oversized, aborted, empty or malformed body simply echoes `null`.

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::Request;
use axum::Json;
use jsonquery_core::body::decode_body;
use jsonquery_core::document::ResponseDocument;
use serde_json::Value;

use crate::state::AppState;

/// ANY / and ANY /jsonquery-server-sample.php
///
/// Takes the raw request rather than a `Json` extractor so that neither the
/// content type nor the body size can turn into a rejection.
pub async fn echo(State(state): State<AppState>, request: Request<Body>) -> Json<ResponseDocument> {
    let method = request.method().clone();

    let object = match to_bytes(request.into_body(), state.config.max_body_bytes).await {
        Ok(bytes) => decode_body(&bytes),
        Err(e) => {
            tracing::debug!(
                error = %e,
                limit = state.config.max_body_bytes,
                "Failed to read request body, echoing null",
            );
            Value::Null
        }
    };

    tracing::debug!(%method, object_kind = value_kind(&object), "Echoing request payload");

    Json(ResponseDocument::echo(object))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
