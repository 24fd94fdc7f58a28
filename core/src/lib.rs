//! Synchronous GitHub API client core.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The actual round-trip goes
//! through a [`Transport`], so a client configured for `api.github.com` can
//! be pointed at any backend, including an in-process mock, without changing
//! how its requests are built.
//!
//! # Design
//! - `GithubClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Error bodies are decoded into `ApiError` with GitHub's `message`.
//! - List responses expose `Link` header pagination as `Page<T>`.

pub mod client;
pub mod error;
pub mod http;
pub mod pagination;
pub mod types;

pub use client::{GithubClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorBody, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use pagination::{parse_link_header, PageLinks};
pub use types::{CreateRelease, Organization, Page, Release, Repository, User};
