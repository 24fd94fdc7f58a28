use std::collections::HashMap;

use axum::body::Body;
use axum::extract::Query;
use axum::http::header::LINK;
use axum::http::HeaderValue;
use axum::response::Response;
use bytes::Bytes;
use tracing::error;

use super::{MockRequest, ResponseHandler};

/// Serves page `n` of its bodies for `?page=n` and advertises the
/// neighbouring pages in a `Link` header.
///
/// Holds no per-request state, so concurrent requests for different pages
/// are fine. A missing or empty `page` parameter means page 1. A `page` that
/// is not an integer, or that points outside the configured pages, panics:
/// the client driving the pagination is the code under test and is expected
/// to only follow links the mock handed out.
#[derive(Debug, Clone)]
pub struct PaginatedHandler {
    pages: Vec<Bytes>,
}

impl PaginatedHandler {
    pub fn new<I, B>(pages: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl ResponseHandler for PaginatedHandler {
    fn serve(&self, request: &MockRequest) -> Response {
        let current = current_page(request);
        let links = link_header(current, self.pages.len());

        let mut response = if self.pages.is_empty() {
            Response::default()
        } else {
            match current.checked_sub(1).and_then(|index| self.pages.get(index)) {
                Some(body) => Response::new(Body::from(body.clone())),
                None => {
                    let path = request.uri().path();
                    error!(path, page = current, pages = self.pages.len(), "page out of range");
                    panic!("page {current} out of range for {path}: {} pages configured", self.pages.len());
                }
            }
        };

        // only ASCII digits and punctuation, always a valid header value
        if let Ok(value) = HeaderValue::from_str(&links) {
            response.headers_mut().insert(LINK, value);
        }
        response
    }
}

fn current_page(request: &MockRequest) -> usize {
    let query = match Query::<HashMap<String, String>>::try_from_uri(request.uri()) {
        Ok(Query(query)) => query,
        Err(err) => {
            error!(path = request.uri().path(), error = %err, "invalid query string");
            panic!("invalid query for {}: {err}", request.uri().path());
        }
    };

    let raw = query.get("page").map(String::as_str).unwrap_or_default();
    if raw.is_empty() {
        return 1;
    }
    match raw.parse() {
        Ok(page) => page,
        Err(_) => {
            error!(path = request.uri().path(), page = raw, "invalid page parameter");
            panic!("invalid page: {raw}");
        }
    }
}

/// `Link` header value for `current` out of `last` pages.
///
/// `first` and `last` are present once there is at least one page, `next`
/// only before the last page and `prev` only after the first one. Targets
/// carry nothing but the page number.
pub fn link_header(current: usize, last: usize) -> String {
    let mut links = Vec::with_capacity(4);
    if last >= 1 {
        links.push(r#"<?page=1>; rel="first""#.to_string());
        links.push(format!(r#"<?page={last}>; rel="last""#));
    }
    if current < last {
        links.push(format!(r#"<?page={}>; rel="next""#, current + 1));
    }
    if current > 1 {
        links.push(format!(r#"<?page={}>; rel="prev""#, current - 1));
    }
    links.join(", ")
}
