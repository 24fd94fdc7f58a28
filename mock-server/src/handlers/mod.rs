//! Response handlers: what a matched endpoint answers with.
//!
//! # Design
//! Every endpoint is served by a [`ResponseHandler`]. The built-in ones
//! replay canned bodies ([`SequencedHandler`], [`PaginatedHandler`]); any
//! closure `Fn(&MockRequest) -> Response` is a handler too, which is how
//! tests inspect headers or bodies, or simulate server-side failures.
//!
//! Handlers run synchronously on the server's runtime. The request body has
//! already been read in full, so a handler never blocks on I/O.

mod paginated;
mod sequenced;

use axum::http::Request;
use axum::response::Response;
use bytes::Bytes;

pub use paginated::{link_header, PaginatedHandler};
pub use sequenced::SequencedHandler;

/// A request as seen by a handler: head plus the fully-read body.
///
/// The captured path parameters are available as
/// `request.extensions().get::<PathParams>()`.
pub type MockRequest = Request<Bytes>;

/// Receives a request, writes a response.
pub trait ResponseHandler: Send + Sync + 'static {
    fn serve(&self, request: &MockRequest) -> Response;
}

impl<F> ResponseHandler for F
where
    F: Fn(&MockRequest) -> Response + Send + Sync + 'static,
{
    fn serve(&self, request: &MockRequest) -> Response {
        self(request)
    }
}
