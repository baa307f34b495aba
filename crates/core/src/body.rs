//! Lenient decoding of request bodies.
//!
//! The fixture never rejects input: anything that is not a single valid JSON
//! text decodes to `null`. A body that literally is `null` decodes to the
//! same value, so the two cases cannot be told apart from the response.

use serde::Deserialize;
use serde_json::Value;

/// Deepest array/object nesting accepted in a request body.
///
/// Matches the default depth of PHP's `json_decode`, which the fixture's
/// clients were written against.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Decode a raw request body into a JSON value.
///
/// Returns [`Value::Null`] for an empty or whitespace-only body and for any
/// parse failure (malformed text, invalid UTF-8, trailing data, nesting
/// deeper than [`MAX_NESTING_DEPTH`]).
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    let depth = nesting_depth(bytes);
    if depth > MAX_NESTING_DEPTH {
        tracing::debug!(
            depth,
            limit = MAX_NESTING_DEPTH,
            "Request body nests too deeply, echoing null",
        );
        return Value::Null;
    }

    match parse_unbounded(bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(
                error = %e,
                body_len = bytes.len(),
                "Request body is not valid JSON, echoing null",
            );
            Value::Null
        }
    }
}

/// Parse without serde_json's fixed recursion limit; the stack grows on the
/// heap as needed. Callers bound the depth beforehand.
fn parse_unbounded(bytes: &[u8]) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Maximum bracket nesting outside of string literals.
///
/// Runs over arbitrary bytes; unbalanced or malformed input still yields a
/// number and is left for the parser to reject.
fn nesting_depth(bytes: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &b in bytes {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    max_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_body() {
        assert_eq!(decode_body(br#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn array_body() {
        assert_eq!(decode_body(b"[1,2,3]"), json!([1, 2, 3]));
    }

    #[test]
    fn scalar_bodies() {
        assert_eq!(decode_body(b"\"hello\""), json!("hello"));
        assert_eq!(decode_body(b"42"), json!(42));
        assert_eq!(decode_body(b"-0.5"), json!(-0.5));
        assert_eq!(decode_body(b"false"), json!(false));
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(decode_body(b""), Value::Null);
    }

    #[test]
    fn whitespace_body_is_null() {
        assert_eq!(decode_body(b"  \r\n\t "), Value::Null);
    }

    #[test]
    fn malformed_body_is_null() {
        assert_eq!(decode_body(b"not json"), Value::Null);
        assert_eq!(decode_body(b"{\"a\":"), Value::Null);
    }

    #[test]
    fn literal_null_is_null() {
        assert_eq!(decode_body(b"null"), Value::Null);
    }

    #[test]
    fn trailing_data_is_null() {
        assert_eq!(decode_body(b"{} {}"), Value::Null);
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        assert_eq!(decode_body(b"\n  {\"a\": true}\n"), json!({"a": true}));
    }

    #[test]
    fn invalid_utf8_is_null() {
        assert_eq!(decode_body(b"\"\xff\xfe\""), Value::Null);
    }

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn nesting_past_serde_default_limit_is_echoed() {
        let text = nested_arrays(200);
        let value = decode_body(text.as_bytes());

        assert!(!value.is_null());
        assert_eq!(serde_json::to_string(&value).unwrap(), text);
    }

    #[test]
    fn nesting_at_limit_is_echoed() {
        let text = nested_arrays(MAX_NESTING_DEPTH);
        assert!(decode_body(text.as_bytes()).is_array());
    }

    #[test]
    fn nesting_past_limit_is_null() {
        let text = nested_arrays(MAX_NESTING_DEPTH + 1);
        assert_eq!(decode_body(text.as_bytes()), Value::Null);
    }

    #[test]
    fn brackets_inside_strings_do_not_count() {
        let inner = "[".repeat(MAX_NESTING_DEPTH + 10);
        let text = format!(r#"{{"s":"{inner}\"{{"}}"#);

        assert_eq!(nesting_depth(text.as_bytes()), 1);
        assert_eq!(decode_body(text.as_bytes()), json!({"s": format!("{inner}\"{{")}));
    }

    #[test]
    fn mixed_nesting_depth() {
        assert_eq!(nesting_depth(br#"{"a":[{"b":[]}],"c":{}}"#), 4);
        assert_eq!(nesting_depth(b"42"), 0);
    }

    #[test]
    fn unicode_survives() {
        assert_eq!(
            decode_body("{\"name\":\"Ünreal ✓\"}".as_bytes()),
            json!({"name": "Ünreal ✓"})
        );
    }
}
