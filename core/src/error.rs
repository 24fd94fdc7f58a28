//! Error types for the GitHub API client.
//!
//! # Design
//! API failures carry the `message` from GitHub's error body so tests can
//! assert on exactly what the server said. `NotFound` gets a dedicated
//! variant because callers frequently distinguish "the resource does not
//! exist" from any other failure. Transport failures are kept apart: they
//! mean no response was received at all.

use serde::Deserialize;
use thiserror::Error;

/// Failure to complete an HTTP exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request URL could not be used.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connecting, writing or reading failed.
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Errors returned by `GithubClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server returned any other non-success status.
    #[error("HTTP {status}: {message}")]
    Response { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// The server-provided message for API errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::Response { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Status code for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The body GitHub sends with error statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

impl ErrorBody {
    /// Extract the message from an error body, falling back to the raw text
    /// when the body is not a GitHub error envelope.
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .map(|parsed| parsed.message)
            .unwrap_or_else(|_| body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_envelope() {
        let body = r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com/rest"}"#;
        assert_eq!(ErrorBody::message_from(body), "Bad credentials");
    }

    #[test]
    fn message_from_plain_text_falls_back_to_body() {
        assert_eq!(ErrorBody::message_from("upstream exploded"), "upstream exploded");
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::Response {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(err.message(), Some("boom"));
        assert_eq!(err.status(), Some(500));
    }
}
