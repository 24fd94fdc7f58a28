//! The HTTP server that fronts an [`EndpointRouter`].
//!
//! # Design
//! The router is mounted as the single fallback of an axum app, so every
//! request, whatever its method or path, goes through the router's own
//! matching and its 404 envelope. Bodies are read in full before a handler
//! runs.
//!
//! [`MockServer`] runs the app on a dedicated thread with its own
//! current-thread tokio runtime. Callers stay fully synchronous and several
//! servers can live in one process. A handler that panics takes down only
//! the connection it was serving; the client sees the exchange fail.

use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::thread::JoinHandle;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::envelope::write_error;
use crate::error::MockError;
use crate::router::EndpointRouter;

/// Where a mock server listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    /// Loopback on an OS-assigned port.
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        }
    }
}

pub fn app(router: EndpointRouter) -> Router {
    Router::new().fallback(serve_mock).with_state(Arc::new(router))
}

async fn serve_mock(State(router): State<Arc<EndpointRouter>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(err) => {
            return write_error(StatusCode::BAD_REQUEST, format!("failed to read request body: {err}"));
        }
    };
    router.dispatch(Request::from_parts(parts, body))
}

pub async fn run(listener: TcpListener, router: EndpointRouter) -> Result<(), io::Error> {
    axum::serve(listener, app(router)).await
}

/// Serve until `shutdown` completes, then finish in-flight requests.
pub async fn run_until<F>(listener: TcpListener, router: EndpointRouter, shutdown: F) -> Result<(), io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(router))
        .with_graceful_shutdown(shutdown)
        .await
}

/// A running mock server on its own thread.
///
/// Dropping it shuts it down; [`shutdown`](Self::shutdown) does the same and
/// reports how the server stopped.
pub struct MockServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<Result<(), io::Error>>>,
}

impl MockServer {
    /// Bind `config.bind_addr` and start serving `router`.
    ///
    /// The socket is bound before this returns, so the server accepts
    /// connections as soon as the caller gets it.
    pub fn start(config: ServerConfig, router: EndpointRouter) -> Result<Self, MockError> {
        let std_listener = std::net::TcpListener::bind(config.bind_addr).map_err(MockError::Bind)?;
        let addr = std_listener.local_addr().map_err(MockError::Bind)?;
        std_listener.set_nonblocking(true).map_err(MockError::Bind)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(MockError::Runtime)?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let endpoints = router.len();

        let thread = std::thread::Builder::new()
            .name(format!("github-mock-{}", addr.port()))
            .spawn(move || {
                runtime.block_on(async move {
                    let listener = TcpListener::from_std(std_listener)?;
                    run_until(listener, router, async move {
                        let _ = shutdown_rx.await;
                    })
                    .await
                })
            })
            .map_err(MockError::Runtime)?;

        info!(%addr, endpoints, "mock server listening");
        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://ip:port` of the server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections, wait for the server thread and release
    /// the socket.
    pub fn shutdown(mut self) -> Result<(), MockError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), MockError> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        let result = thread.join().map_err(|_| MockError::ServerPanicked)?;
        info!(addr = %self.addr, "mock server stopped");
        result.map_err(MockError::Serve)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(addr = %self.addr, error = %err, "mock server did not stop cleanly");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpStream;

    use super::*;

    #[test]
    fn default_config_binds_loopback_any_port() {
        let config = ServerConfig::default();
        assert!(config.bind_addr.ip().is_loopback());
        assert_eq!(config.bind_addr.port(), 0);
    }

    #[test]
    fn shutdown_releases_the_socket() {
        let server = MockServer::start(ServerConfig::default(), EndpointRouter::new()).unwrap();
        let addr = server.addr();
        assert_ne!(addr.port(), 0);
        assert!(TcpStream::connect(addr).is_ok());
        assert_eq!(server.url(), format!("http://{addr}"));

        server.shutdown().unwrap();
        assert!(std::net::TcpListener::bind(addr).is_ok());
    }
}
