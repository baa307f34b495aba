//! The response document returned by every echo request.

use serde::Serialize;
use serde_json::Value;

/// Descriptive text carried in the `info` field of every response.
pub const INFO_TEXT: &str =
    "This script returns some types of JSON properties and the JSON sent from Unreal as a sub-object.";

/// Fixed-shape response document.
///
/// The first five fields are literals that never change between requests so
/// a client can check it decodes each JSON value kind. Only `object` varies:
/// it holds whatever JSON the caller sent, or `null`.
///
/// Field declaration order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseDocument {
    pub info: &'static str,
    pub boolean: bool,
    pub integer: i64,
    pub float: f64,
    pub null: Value,
    pub object: Value,
}

impl ResponseDocument {
    /// Build the document around the decoded request payload.
    pub fn echo(object: Value) -> Self {
        Self {
            info: INFO_TEXT,
            boolean: true,
            integer: 1,
            float: 2.0,
            null: Value::Null,
            object,
        }
    }
}
