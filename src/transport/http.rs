//! [`Transport`] over HTTP with reqwest.

use super::{Method, Transport, TransportRequest};
use crate::error::RequestError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Header carrying the session token.
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// HTTP transport to the town service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL of the service, without trailing slash.
    base_url: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport to `base_url` whose requests give up after `timeout`.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(timeout_ms = timeout.as_millis() as u64, "HTTP transport ready");
        Ok(Self { base_url, client })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    async fn send(&self, request: TransportRequest) -> Result<serde_json::Value, RequestError> {
        let url = format!("{}{}", self.base_url, request.path());

        let builder = match request.method() {
            Method::Get => self.client.get(&url).query(request.body()),
            Method::Post => self.client.post(&url).json(request.body()),
        };

        let response = builder
            .header(SESSION_TOKEN_HEADER, request.session_token())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Failed to send request");
                RequestError::new(format!("HTTP request failed: {}", e))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            RequestError::new(format!("Failed to read response: {}", e))
        })?;
        debug!(status = %status, response = %text, "Response body");

        // Rejections often arrive as an envelope on a 4xx status, so the body
        // wins over the status whenever it parses.
        match serde_json::from_str(&text) {
            Ok(json) => Ok(json),
            Err(_) if !status.is_success() => {
                error!(status = %status, response = %text, "Server returned error status");
                Err(RequestError::new(format!("HTTP {}: {}", status, text)))
            }
            Err(e) => {
                error!(error = %e, response = %text, "Failed to parse JSON response");
                Err(RequestError::new(format!("Invalid JSON response: {}", e)))
            }
        }
    }
}
