//! Client-side transports for talking to a mock backend.
//!
//! # Design
//! [`UreqTransport`] is the plain blocking transport; it reports every HTTP
//! status as data so the client under test does its own status handling.
//! [`EnforceHostTransport`] wraps any transport and forces the scheme and
//! authority of each request to a fixed target. A client built for
//! `https://api.github.com` keeps constructing its URLs exactly as in
//! production, and the wrapper sends them to the mock instead.

use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::Uri;
use github_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::trace;

use crate::error::MockError;

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();
        let body = request.body.as_deref().map(str::as_bytes);

        let result = match (request.method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(url), headers).send(body),
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(url), headers).send(body),
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
            (HttpMethod::Patch, Some(body)) => with_headers(self.agent.patch(url), headers).send(body),
            (HttpMethod::Patch, None) => with_headers(self.agent.patch(url), headers).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Rewrites the scheme and authority of every request to a fixed target
/// before handing it to the inner transport.
#[derive(Debug, Clone)]
pub struct EnforceHostTransport<T> {
    scheme: Scheme,
    authority: Authority,
    inner: T,
}

impl<T: Transport> EnforceHostTransport<T> {
    /// `host` must have the form `scheme://authority`, e.g.
    /// `http://127.0.0.1:8080`.
    pub fn new(host: &str, inner: T) -> Result<Self, MockError> {
        let invalid = || MockError::InvalidHost(host.to_string());
        let (scheme, authority) = host.split_once("://").ok_or_else(invalid)?;
        let scheme = Scheme::try_from(scheme).map_err(|_| invalid())?;
        let authority = Authority::try_from(authority).map_err(|_| invalid())?;
        Ok(Self {
            scheme,
            authority,
            inner,
        })
    }

    /// The enforced target as `scheme://authority`.
    pub fn host(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Replace scheme and authority of `url`, keeping path and query.
    pub fn rewrite(&self, url: &str) -> Result<String, TransportError> {
        let invalid = |reason: String| TransportError::InvalidUrl {
            url: url.to_string(),
            reason,
        };
        let uri: Uri = url.parse().map_err(|e: axum::http::uri::InvalidUri| invalid(e.to_string()))?;

        let mut parts = uri.into_parts();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        let rewritten = Uri::from_parts(parts).map_err(|e| invalid(e.to_string()))?;
        Ok(rewritten.to_string())
    }
}

impl<T: Transport> Transport for EnforceHostTransport<T> {
    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let rewritten = self.rewrite(&request.url)?;
        trace!(from = %request.url, to = %rewritten, "enforcing mock host");
        request.url = rewritten;
        self.inner.send(request)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recording {
        urls: Mutex<Vec<String>>,
    }

    impl Transport for Recording {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.urls.lock().unwrap().push(request.url);
            Ok(HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: String::new(),
            })
        }
    }

    struct Failing;

    impl Transport for Failing {
        fn send(&self, _: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Connection("refused".to_string()))
        }
    }

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn rewrites_scheme_and_authority_keeping_path_and_query() {
        let transport = EnforceHostTransport::new("http://127.0.0.1:4000", Recording::default()).unwrap();
        let response = transport
            .send(get("https://example.invalid/orgs/acme/repos?page=2"))
            .unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(
            transport.inner().urls.lock().unwrap().as_slice(),
            ["http://127.0.0.1:4000/orgs/acme/repos?page=2"]
        );
    }

    #[test]
    fn url_without_path_gets_root() {
        let transport = EnforceHostTransport::new("http://localhost:1", Recording::default()).unwrap();
        assert_eq!(transport.rewrite("https://api.github.com").unwrap(), "http://localhost:1/");
    }

    #[test]
    fn relative_url_is_made_absolute() {
        let transport = EnforceHostTransport::new("http://localhost:1", Recording::default()).unwrap();
        assert_eq!(transport.rewrite("/user").unwrap(), "http://localhost:1/user");
    }

    #[test]
    fn inner_errors_pass_through_unchanged() {
        let transport = EnforceHostTransport::new("http://localhost:1", Failing).unwrap();
        let err = transport.send(get("https://api.github.com/user")).unwrap_err();
        assert!(matches!(err, TransportError::Connection(reason) if reason == "refused"));
    }

    #[test]
    fn host_must_have_scheme_and_authority() {
        assert!(matches!(
            EnforceHostTransport::new("127.0.0.1:4000", Failing),
            Err(MockError::InvalidHost(_))
        ));
        assert!(EnforceHostTransport::new("http://", Failing).is_err());
        let transport = EnforceHostTransport::new("http://127.0.0.1:4000", Failing).unwrap();
        assert_eq!(transport.host(), "http://127.0.0.1:4000");
    }
}
