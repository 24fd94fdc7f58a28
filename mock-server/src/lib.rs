//! A programmable mock of the GitHub REST API.
//!
//! # Overview
//! Declare the endpoints a test needs together with canned responses, and
//! get back a transport that serves them from a real in-process HTTP server.
//! The client under test keeps building `https://api.github.com/...` URLs;
//! the transport rewrites every request to the mock's address.
//!
//! # Design
//! - [`EndpointRouter`] matches (method, path template) pairs with
//!   `matchit` and answers anything unmatched with GitHub's 404 error
//!   envelope.
//! - Handlers replay bodies in order ([`SequencedHandler`]), serve pages with
//!   a `Link` header ([`PaginatedHandler`]), or run caller code (any
//!   [`ResponseHandler`]).
//! - Running out of canned responses or receiving a malformed page number
//!   is a broken test, not an API error: the handler panics and the client
//!   sees the request fail.
//! - [`new_mocked_client`] wires it together: router, server, and an
//!   [`EnforceHostTransport`] pointed at the server.

pub mod client;
pub mod endpoint;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod fixtures;
pub mod handlers;
pub mod options;
pub mod router;
pub mod server;
pub mod template;
pub mod transport;

pub use client::{build_router, new_mocked_client, MockedClient};
pub use endpoint::EndpointPattern;
pub use envelope::{not_found, write_error, ErrorEnvelope, FieldError};
pub use error::MockError;
pub use fixtures::Fixtures;
pub use handlers::{link_header, MockRequest, PaginatedHandler, ResponseHandler, SequencedHandler};
pub use options::{
    must_serialize, with_error_response, with_json_match, with_json_pages, with_request_match,
    with_request_match_handler, with_request_match_pages, MockBackendOption,
};
pub use router::{EndpointRouter, RouteMatch};
pub use server::{app, run, run_until, MockServer, ServerConfig};
pub use template::{PathParams, PathTemplate};
pub use transport::{EnforceHostTransport, UreqTransport};
