//! Configurators that populate the router of a mocked backend.
//!
//! Each `with_*` function returns a [`MockBackendOption`]: a one-shot
//! function from router to router. Options are applied in the order they
//! are given; two options for the same endpoint leave the later one in place.
//! An option whose pattern cannot be registered fails the whole backend.
//!
//! ```no_run
//! use github_mock::endpoints::{GET_ORGS_REPOS_BY_ORG, GET_USERS_BY_USERNAME};
//! use github_mock::{new_mocked_client, with_json_match, with_request_match_pages};
//!
//! let client = new_mocked_client([
//!     with_json_match(GET_USERS_BY_USERNAME, &[serde_json::json!({ "login": "octocat" })]),
//!     with_request_match_pages(GET_ORGS_REPOS_BY_ORG, [r#"[{"name":"a"}]"#, r#"[{"name":"b"}]"#]),
//! ])?;
//! # Ok::<(), github_mock::MockError>(())
//! ```

use axum::http::StatusCode;
use bytes::Bytes;
use serde::Serialize;

use crate::endpoint::EndpointPattern;
use crate::envelope::write_error;
use crate::error::MockError;
use crate::handlers::{MockRequest, PaginatedHandler, ResponseHandler, SequencedHandler};
use crate::router::EndpointRouter;

pub type MockBackendOption = Box<dyn FnOnce(EndpointRouter) -> Result<EndpointRouter, MockError> + Send>;

/// Answer `endpoint` with `responses`, one per request, in order.
pub fn with_request_match<I, B>(endpoint: EndpointPattern, responses: I) -> MockBackendOption
where
    I: IntoIterator<Item = B>,
    B: Into<Bytes>,
{
    let handler = SequencedHandler::new(responses);
    Box::new(move |router: EndpointRouter| router.route(endpoint, handler))
}

/// Answer `endpoint` with the page selected by the `page` query parameter.
pub fn with_request_match_pages<I, B>(endpoint: EndpointPattern, pages: I) -> MockBackendOption
where
    I: IntoIterator<Item = B>,
    B: Into<Bytes>,
{
    let handler = PaginatedHandler::new(pages);
    Box::new(move |router: EndpointRouter| router.route(endpoint, handler))
}

/// Serve `endpoint` with an arbitrary handler.
pub fn with_request_match_handler<H: ResponseHandler>(endpoint: EndpointPattern, handler: H) -> MockBackendOption {
    Box::new(move |router: EndpointRouter| router.route(endpoint, handler))
}

/// [`with_request_match`] with each value serialized to JSON.
pub fn with_json_match<T: Serialize>(endpoint: EndpointPattern, values: &[T]) -> MockBackendOption {
    with_request_match(endpoint, values.iter().map(must_serialize))
}

/// [`with_request_match_pages`] with each page serialized to JSON.
pub fn with_json_pages<T: Serialize>(endpoint: EndpointPattern, pages: &[T]) -> MockBackendOption {
    with_request_match_pages(endpoint, pages.iter().map(must_serialize))
}

/// Answer every request to `endpoint` with an error envelope.
pub fn with_error_response(
    endpoint: EndpointPattern,
    status: StatusCode,
    message: impl Into<String>,
) -> MockBackendOption {
    let message = message.into();
    with_request_match_handler(endpoint, move |_: &MockRequest| write_error(status, message.clone()))
}

/// Serialize a mock body to JSON, panicking on failure.
pub fn must_serialize<T: Serialize + ?Sized>(value: &T) -> Bytes {
    match serde_json::to_vec(value) {
        Ok(json) => Bytes::from(json),
        Err(err) => panic!("failed to serialize mock body: {err}"),
    }
}
