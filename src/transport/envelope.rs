//! The uniform success/failure wrapper around every response.

use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Response envelope returned by the town service for every operation.
///
/// Wire shape: `{ "isOK": bool, "message"?: string, "response"?: T }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded.
    #[serde(rename = "isOK")]
    pub is_ok: bool,
    /// Failure reason, present when `is_ok` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload, present for operations that return one.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
}

impl<T> Envelope<T> {
    /// A successful envelope carrying `response`.
    pub fn ok(response: T) -> Self {
        Self {
            is_ok: true,
            message: None,
            response: Some(response),
        }
    }

    /// A failed envelope carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_ok: false,
            message: Some(message.into()),
            response: None,
        }
    }

    /// Returns the payload, failing if the envelope is not OK or has none.
    #[track_caller]
    pub fn into_response(self) -> Result<T, RequestError> {
        if !self.is_ok {
            return Err(failure_error(self.message));
        }
        self.response
            .ok_or_else(|| RequestError::new("Response envelope is OK but carries no payload"))
    }

    /// Checks the envelope for success and discards any payload.
    #[track_caller]
    pub fn into_ack(self) -> Result<(), RequestError> {
        if !self.is_ok {
            return Err(failure_error(self.message));
        }
        Ok(())
    }
}

#[track_caller]
fn failure_error(message: Option<String>) -> RequestError {
    let message = message.unwrap_or_else(|| "request failed".to_string());
    warn!(message = %message, "Server rejected request");
    RequestError::new(message)
}
