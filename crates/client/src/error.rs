/// Errors from loading, sending or receiving JSON field data.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status code.
    #[error("Server returned HTTP {0}")]
    HttpStatus(u16),

    /// The text was not a JSON object.
    #[error("JSON parsing failed: {0}")]
    JsonParsing(String),

    /// A JSON file could not be read.
    #[error("Failed to read JSON file: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse outcome of a JSON call, for callers that only branch on the kind
/// of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonResult {
    Success,
    HttpFailed,
    JsonParsingFailed,
}

impl ClientError {
    /// Classify this error as a [`JsonResult`].
    pub fn result(&self) -> JsonResult {
        match self {
            ClientError::Http(_) | ClientError::HttpStatus(_) => JsonResult::HttpFailed,
            ClientError::JsonParsing(_) | ClientError::Io(_) => JsonResult::JsonParsingFailed,
        }
    }
}

impl<T> From<&Result<T, ClientError>> for JsonResult {
    fn from(outcome: &Result<T, ClientError>) -> Self {
        match outcome {
            Ok(_) => JsonResult::Success,
            Err(e) => e.result(),
        }
    }
}
