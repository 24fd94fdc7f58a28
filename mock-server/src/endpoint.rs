//! Endpoint descriptors: one (method, path template) pair per API operation.

use std::borrow::Cow;
use std::fmt;

use axum::http::Method;

/// Identifies one logical GitHub API operation.
///
/// Two descriptors are the same endpoint when both the method and the
/// pattern text are equal. Patterns use `{name}` for a single path segment,
/// e.g. `/repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointPattern {
    pattern: Cow<'static, str>,
    method: Method,
}

impl EndpointPattern {
    /// Const constructor used by the endpoint catalog.
    pub const fn from_static(method: Method, pattern: &'static str) -> Self {
        Self {
            pattern: Cow::Borrowed(pattern),
            method,
        }
    }

    pub fn new(method: Method, pattern: impl Into<Cow<'static, str>>) -> Self {
        Self {
            pattern: pattern.into(),
            method,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl fmt::Display for EndpointPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.pattern)
    }
}
