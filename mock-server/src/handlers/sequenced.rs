use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::response::Response;
use bytes::Bytes;
use tracing::error;

use super::{MockRequest, ResponseHandler};

/// Serves its bodies one per request, in order.
///
/// An empty sequence answers every request with an empty 200. A non-empty
/// sequence that runs out panics: the test declared fewer responses than
/// the client actually requested, and replaying stale data would hide that.
///
/// Precondition: at most one request to the same sequenced endpoint is in
/// flight at a time. Concurrent requests are served without a lock and may
/// observe the sequence in any order.
#[derive(Debug)]
pub struct SequencedHandler {
    responses: Vec<Bytes>,
    cursor: AtomicUsize,
}

impl SequencedHandler {
    pub fn new<I, B>(responses: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of requests served so far.
    pub fn served(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    pub fn remaining(&self) -> usize {
        self.responses.len().saturating_sub(self.served())
    }
}

impl ResponseHandler for SequencedHandler {
    fn serve(&self, request: &MockRequest) -> Response {
        if self.responses.is_empty() {
            return Response::default();
        }

        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        match self.responses.get(index) {
            Some(body) => Response::new(Body::from(body.clone())),
            None => {
                let path = request.uri().path();
                error!(path, configured = self.responses.len(), "sequenced mock exhausted");
                panic!("no more mocks available for {path}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;

    use super::*;

    fn request(path: &str) -> MockRequest {
        Request::builder().uri(path).body(Bytes::new()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn serves_bodies_in_order() {
        let handler = SequencedHandler::new(["first", "second"]);
        let req = request("/users/x");

        assert_eq!(body_string(handler.serve(&req)).await, "first");
        assert_eq!(handler.remaining(), 1);
        assert_eq!(body_string(handler.serve(&req)).await, "second");
        assert_eq!(handler.served(), 2);
        assert_eq!(handler.remaining(), 0);
    }

    #[tokio::test]
    async fn empty_sequence_always_answers_empty_ok() {
        let handler = SequencedHandler::new(Vec::<Bytes>::new());
        let req = request("/repos/o/r/releases");
        for _ in 0..3 {
            let response = handler.serve(&req);
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_string(response).await, "");
        }
    }

    #[test]
    #[should_panic(expected = "no more mocks available for /users/x")]
    fn exhausted_sequence_panics() {
        let handler = SequencedHandler::new(["only"]);
        let req = request("/users/x");
        let _ = handler.serve(&req);
        let _ = handler.serve(&req);
    }
}
