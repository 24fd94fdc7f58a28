//! JSON fixture files for running the mock as a standalone server.
//!
//! ```json
//! {
//!   "endpoints": [
//!     { "method": "GET", "pattern": "/users/{username}", "kind": "sequence",
//!       "responses": [{ "login": "octocat" }] },
//!     { "method": "GET", "pattern": "/orgs/{org}/repos", "kind": "pages",
//!       "pages": [[{ "name": "a" }], [{ "name": "b" }]] },
//!     { "method": "DELETE", "pattern": "/repos/{owner}/{repo}", "kind": "error",
//!       "status": 403, "message": "Must have admin rights to Repository." }
//!   ]
//! }
//! ```
//!
//! Every response value is written to the wire as JSON.

use std::path::Path;

use axum::http::{Method, StatusCode};
use serde::Deserialize;

use crate::endpoint::EndpointPattern;
use crate::error::MockError;
use crate::options::{with_error_response, with_json_match, with_json_pages, MockBackendOption};

#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub endpoints: Vec<EndpointFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointFixture {
    pub method: String,
    pub pattern: String,
    #[serde(flatten)]
    pub response: FixtureResponse,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixtureResponse {
    Sequence {
        #[serde(default)]
        responses: Vec<serde_json::Value>,
    },
    Pages {
        #[serde(default)]
        pages: Vec<serde_json::Value>,
    },
    Error {
        status: u16,
        message: String,
    },
}

impl Fixtures {
    pub fn from_path(path: &Path) -> Result<Self, MockError> {
        let raw = std::fs::read_to_string(path).map_err(|source| MockError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, MockError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Convert every fixture into a backend option, in file order.
    pub fn into_options(self) -> Result<Vec<MockBackendOption>, MockError> {
        self.endpoints.into_iter().map(EndpointFixture::into_option).collect()
    }
}

impl EndpointFixture {
    pub fn endpoint(&self) -> Result<EndpointPattern, MockError> {
        let method = Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| MockError::InvalidMethod(self.method.clone()))?;
        Ok(EndpointPattern::new(method, self.pattern.clone()))
    }

    pub fn into_option(self) -> Result<MockBackendOption, MockError> {
        let endpoint = self.endpoint()?;
        Ok(match self.response {
            FixtureResponse::Sequence { responses } => with_json_match(endpoint, &responses),
            FixtureResponse::Pages { pages } => with_json_pages(endpoint, &pages),
            FixtureResponse::Error { status, message } => {
                let status = StatusCode::from_u16(status).map_err(|_| MockError::InvalidStatus(status))?;
                with_error_response(endpoint, status, message)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::build_router;

    const FIXTURES: &str = r#"{
        "endpoints": [
            { "method": "get", "pattern": "/users/{username}", "kind": "sequence",
              "responses": [{ "login": "octocat" }] },
            { "method": "GET", "pattern": "/orgs/{org}/repos", "kind": "pages",
              "pages": [[{ "name": "a" }], [{ "name": "b" }]] },
            { "method": "DELETE", "pattern": "/repos/{owner}/{repo}", "kind": "error",
              "status": 403, "message": "Must have admin rights to Repository." }
        ]
    }"#;

    #[test]
    fn parses_every_kind() {
        let fixtures = Fixtures::from_json_str(FIXTURES).unwrap();
        assert_eq!(fixtures.endpoints.len(), 3);
        assert!(matches!(
            &fixtures.endpoints[0].response,
            FixtureResponse::Sequence { responses } if responses.len() == 1
        ));
        assert!(matches!(
            &fixtures.endpoints[1].response,
            FixtureResponse::Pages { pages } if pages.len() == 2
        ));
        assert!(matches!(
            &fixtures.endpoints[2].response,
            FixtureResponse::Error { status: 403, .. }
        ));
        assert_eq!(fixtures.endpoints[0].endpoint().unwrap().method(), Method::GET);
    }

    #[test]
    fn options_populate_router() {
        let options = Fixtures::from_json_str(FIXTURES).unwrap().into_options().unwrap();
        let router = build_router(options).unwrap();
        assert_eq!(router.len(), 3);
        assert!(router.match_route(&Method::DELETE, "/repos/o/r").is_some());
    }

    #[test]
    fn invalid_status_is_rejected() {
        let raw = r#"{"endpoints":[{"method":"GET","pattern":"/x","kind":"error","status":42,"message":"?"}]}"#;
        let err = Fixtures::from_json_str(raw).unwrap().into_options().err().unwrap();
        assert!(matches!(err, MockError::InvalidStatus(42)));
    }

    #[test]
    fn unknown_kind_is_a_format_error() {
        let raw = r#"{"endpoints":[{"method":"GET","pattern":"/x","kind":"stream"}]}"#;
        assert!(matches!(Fixtures::from_json_str(raw), Err(MockError::FixtureFormat(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Fixtures::from_path(Path::new("/nonexistent/fixtures.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fixtures.json"));
    }
}
