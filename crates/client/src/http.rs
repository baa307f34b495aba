//! HTTP client for posting and fetching JSON field data.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::error::ClientError;
use crate::field_data::JsonFieldData;

/// Timeout for a single request, connect through body.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Multipart field carrying the JSON field data.
pub const DATA_PART: &str = "data";

/// Multipart field carrying the attached file.
pub const FILE_PART: &str = "file";

/// Prefix `http://` onto a URL that carries no scheme.
///
/// ```
/// use jsonquery_client::create_url;
///
/// assert_eq!(create_url("localhost:3000/"), "http://localhost:3000/");
/// assert_eq!(create_url("https://example.com"), "https://example.com");
/// ```
pub fn create_url(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        input.to_string()
    } else {
        format!("http://{input}")
    }
}

/// Sends [`JsonFieldData`] to a server and decodes the JSON object it
/// answers with.
#[derive(Clone)]
pub struct JsonQueryClient {
    client: reqwest::Client,
}

impl JsonQueryClient {
    /// Create a client with the default request timeout.
    pub fn new() -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POST `data` as a JSON body and decode the response object.
    pub async fn post(&self, url: &str, data: &JsonFieldData) -> Result<JsonFieldData, ClientError> {
        let url = create_url(url);
        tracing::debug!(%url, fields = data.as_map().len(), "Posting JSON request");

        let response = self.client.post(&url).json(data).send().await?;
        Self::parse_response(response).await
    }

    /// POST `data` together with the file at `file_path` as
    /// `multipart/form-data`, then decode the response object.
    ///
    /// The form has a [`DATA_PART`] field holding the JSON text and a
    /// [`FILE_PART`] field holding the file bytes under its file name. The
    /// file is read before anything is sent; a read failure is
    /// [`ClientError::Io`].
    pub async fn post_with_file(
        &self,
        url: &str,
        data: &JsonFieldData,
        file_path: impl AsRef<Path>,
    ) -> Result<JsonFieldData, ClientError> {
        let file_path = file_path.as_ref();
        let bytes = tokio::fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FILE_PART.to_string());

        let url = create_url(url);
        tracing::debug!(
            %url,
            file = %file_path.display(),
            file_bytes = bytes.len(),
            "Posting JSON request with file",
        );

        let form = Form::new()
            .part(
                DATA_PART,
                Part::text(data.to_string()).mime_str("application/json")?,
            )
            .part(
                FILE_PART,
                Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("application/octet-stream")?,
            );

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::parse_response(response).await
    }

    /// GET `url` and decode the response object.
    pub async fn get(&self, url: &str) -> Result<JsonFieldData, ClientError> {
        let url = create_url(url);
        tracing::debug!(%url, "Sending JSON GET request");

        let response = self.client.get(&url).send().await?;
        Self::parse_response(response).await
    }

    /// Reject non-2xx statuses, then parse the body as a JSON object.
    async fn parse_response(response: reqwest::Response) -> Result<JsonFieldData, ClientError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %response.url(), "JSON request failed");
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        let text = response.text().await?;
        text.parse()
    }
}
