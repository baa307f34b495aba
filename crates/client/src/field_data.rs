//! JSON object container with typed field accessors.
//!
//! Setters replace any existing value under the same key and return
//! `&mut Self` so calls can be chained. Getters return `None` when the key is
//! missing or holds a value of another JSON kind.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;

/// A JSON object with typed accessors.
///
/// Serializes as the bare object, so it can be sent as a request body
/// directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonFieldData {
    data: Map<String, Value>,
}

impl JsonFieldData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load field data from a JSON file containing a single object.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded JSON file");
        text.parse()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    // ---- setters ----

    fn set(&mut self, key: &str, value: Value) -> &mut Self {
        self.data.insert(key.to_string(), value);
        self
    }

    pub fn set_string(&mut self, key: &str, value: &str) -> &mut Self {
        self.set(key, Value::from(value))
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.set(key, Value::Bool(value))
    }

    /// Stores the value widened to `f64`. Non-finite values are stored as
    /// `null` since JSON has no representation for them.
    pub fn set_float(&mut self, key: &str, value: f32) -> &mut Self {
        self.set(key, Value::from(f64::from(value)))
    }

    pub fn set_int(&mut self, key: &str, value: i32) -> &mut Self {
        self.set(key, Value::from(value))
    }

    pub fn set_null(&mut self, key: &str) -> &mut Self {
        self.set(key, Value::Null)
    }

    pub fn set_string_array<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> &mut Self {
        let array = values.iter().map(|s| Value::from(s.as_ref())).collect();
        self.set(key, Value::Array(array))
    }

    pub fn set_bool_array(&mut self, key: &str, values: &[bool]) -> &mut Self {
        let array = values.iter().copied().map(Value::Bool).collect();
        self.set(key, Value::Array(array))
    }

    pub fn set_float_array(&mut self, key: &str, values: &[f32]) -> &mut Self {
        let array = values.iter().map(|v| Value::from(f64::from(*v))).collect();
        self.set(key, Value::Array(array))
    }

    pub fn set_int_array(&mut self, key: &str, values: &[i32]) -> &mut Self {
        let array = values.iter().copied().map(Value::from).collect();
        self.set(key, Value::Array(array))
    }

    /// Stores an array of `len` nulls.
    pub fn set_null_array(&mut self, key: &str, len: usize) -> &mut Self {
        self.set(key, Value::Array(vec![Value::Null; len]))
    }

    pub fn set_object(&mut self, key: &str, object: &JsonFieldData) -> &mut Self {
        self.set(key, Value::Object(object.data.clone()))
    }

    pub fn set_object_array(&mut self, key: &str, objects: &[JsonFieldData]) -> &mut Self {
        let array = objects
            .iter()
            .map(|o| Value::Object(o.data.clone()))
            .collect();
        self.set(key, Value::Array(array))
    }

    // ---- getters ----

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.data.get(key)?.as_str()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.data.get(key)?.as_bool()
    }

    /// Any JSON number, truncated toward zero and saturated to `i32`.
    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.data.get(key)?.as_f64().map(|n| n as i32)
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        self.data.get(key)?.as_f64().map(|n| n as f32)
    }

    /// `Some(true)` when the field exists and is `null`, `None` when the
    /// field does not exist.
    pub fn get_is_null(&self, key: &str) -> Option<bool> {
        self.data.get(key).map(Value::is_null)
    }

    pub fn get_object(&self, key: &str) -> Option<JsonFieldData> {
        self.data.get(key)?.as_object().map(|map| Self { data: map.clone() })
    }

    pub fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        self.array_of(key, |v| v.as_str().map(str::to_string))
    }

    pub fn get_bool_array(&self, key: &str) -> Option<Vec<bool>> {
        self.array_of(key, Value::as_bool)
    }

    pub fn get_int_array(&self, key: &str) -> Option<Vec<i32>> {
        self.array_of(key, |v| v.as_f64().map(|n| n as i32))
    }

    pub fn get_float_array(&self, key: &str) -> Option<Vec<f32>> {
        self.array_of(key, |v| v.as_f64().map(|n| n as f32))
    }

    pub fn get_object_array(&self, key: &str) -> Option<Vec<JsonFieldData>> {
        self.array_of(key, |v| v.as_object().map(|map| Self { data: map.clone() }))
    }

    /// Elements of another kind than `pick` accepts are skipped.
    fn array_of<T>(&self, key: &str, pick: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
        let array = self.data.get(key)?.as_array()?;
        Some(array.iter().filter_map(pick).collect())
    }
}

impl FromStr for JsonFieldData {
    type Err = ClientError;

    /// Parse a JSON text whose top level is an object.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(data)) => Ok(Self { data }),
            Ok(other) => Err(ClientError::JsonParsing(format!(
                "expected a JSON object, got {}",
                kind_name(&other)
            ))),
            Err(e) => Err(ClientError::JsonParsing(e.to_string())),
        }
    }
}

impl fmt::Display for JsonFieldData {
    /// Compact JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.data).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
