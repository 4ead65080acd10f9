//! Error types shared by the transport, session client and render loop.

use crate::games::wordle::ContractViolation;
use derive_more::{Display, Error, From};
use tracing::instrument;

/// Failure of a request to the town service.
///
/// Covers both transport failures (connection refused, bad JSON) and
/// application rejections delivered through the response envelope. Callers at
/// this layer do not distinguish the two.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Request error: {} at {}:{}", message, file, line)]
pub struct RequestError {
    /// Human-readable message, suitable for a transient notice.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RequestError {
    /// Creates a new request error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the message without location details.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for RequestError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for RequestError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed response: {}", err))
    }
}

/// Anything that can go wrong while refreshing the derived view.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum RefreshError {
    /// The snapshot could not be fetched.
    #[display("{}", _0)]
    Request(RequestError),
    /// The snapshot was fetched but breaks the agreed data model.
    #[display("{}", _0)]
    Contract(ContractViolation),
}
