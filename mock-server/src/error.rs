//! Errors from building and running a mock backend.
//!
//! These cover the infrastructure around the mock (sockets, threads,
//! fixture files). Requests the mock cannot answer are not errors here:
//! they are either 404 envelopes or deliberate panics in a handler.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockError {
    #[error("failed to bind mock server: {0}")]
    Bind(#[source] io::Error),

    #[error("failed to start mock server runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("mock server stopped with an error: {0}")]
    Serve(#[source] io::Error),

    #[error("mock server thread panicked")]
    ServerPanicked,

    #[error("unsupported path pattern {pattern:?}: {reason}")]
    UnsupportedPattern { pattern: String, reason: String },

    #[error("cannot register {endpoint}: {source}")]
    RouteConflict {
        endpoint: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("invalid target host {0:?}, expected scheme://authority")]
    InvalidHost(String),

    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    #[error("invalid HTTP status {0}")]
    InvalidStatus(u16),

    #[error("failed to read fixtures from {}: {source}", path.display())]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid fixtures: {0}")]
    FixtureFormat(#[from] serde_json::Error),
}
