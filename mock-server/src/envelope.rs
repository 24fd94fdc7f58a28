//! GitHub-shaped error responses.
//!
//! # Design
//! GitHub reports failures as a JSON object with a `message`, optionally a
//! list of field `errors` and a `documentation_url`. Writing the same shape
//! from the mock means the client's error-unwrapping code runs exactly as it
//! would against the real API. Empty optional parts are left out of the
//! body entirely.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// One entry of the `errors` array of a validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub resource: String,
    pub field: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The error body GitHub sends alongside non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
            documentation_url: None,
        }
    }

    pub fn with_error(mut self, error: FieldError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Render the envelope as a JSON response with the given status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Write `{"message": message}` with `status`.
pub fn write_error(status: StatusCode, message: impl Into<String>) -> Response {
    ErrorEnvelope::new(message).into_response_with(status)
}

/// The response for requests no registered endpoint matches.
pub fn not_found(path: &str) -> Response {
    write_error(StatusCode::NOT_FOUND, format!("mock response not found for {path}"))
}
