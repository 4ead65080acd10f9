//! Request/response plumbing to the town service.
//!
//! [`Transport`] is the seam: it moves one JSON request to the service and
//! brings the raw JSON envelope back. [`TransportClient`] layers typed
//! decoding and envelope unwrapping on top, so every operation fails the same
//! way, with a [`RequestError`].

mod envelope;
mod http;

pub use envelope::Envelope;
pub use http::HttpTransport;

use crate::error::RequestError;
use async_trait::async_trait;
use derive_getters::Getters;
use derive_new::new;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// Read-only request; the body travels as query parameters.
    Get,
    /// Mutating request; the body travels as JSON.
    Post,
}

/// One request to the town service.
#[derive(Debug, Clone, PartialEq, Getters, new)]
pub struct TransportRequest {
    /// HTTP method.
    method: Method,
    /// Path below the service base URL, starting with `/`.
    #[new(into)]
    path: String,
    /// Session token scoping the request, sent as a header.
    #[new(into)]
    session_token: String,
    /// Request fields.
    body: serde_json::Value,
}

/// Moves a request to the service and returns the raw response envelope.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends `request` and returns the JSON body of the response.
    async fn send(&self, request: TransportRequest) -> Result<serde_json::Value, RequestError>;
}

/// Typed request client over any [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportClient {
    transport: Arc<dyn Transport>,
}

impl TransportClient {
    /// Wraps a transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Wraps a shared transport.
    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends `request` and returns the envelope's payload, which must be present.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: TransportRequest,
    ) -> Result<T, RequestError> {
        let raw = self.transport.send(request).await?;
        let envelope: Envelope<T> = serde_json::from_value(raw)?;
        debug!(is_ok = envelope.is_ok, "Envelope received");
        envelope.into_response()
    }

    /// Sends `request` and checks only that the envelope reports success.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn request_ack(&self, request: TransportRequest) -> Result<(), RequestError> {
        let raw = self.transport.send(request).await?;
        let envelope: Envelope<serde_json::Value> = serde_json::from_value(raw)?;
        debug!(is_ok = envelope.is_ok, "Envelope received");
        envelope.into_ack()
    }
}
