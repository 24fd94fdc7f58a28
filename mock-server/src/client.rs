//! The mocked-client factory.
//!
//! # Design
//! One call builds a fresh router, applies the options in order, starts a
//! real server for it and returns a transport that reaches that server no
//! matter which host the request URLs name. Nothing is shared between calls,
//! so tests can each own an independent backend.

use github_core::{HttpRequest, HttpResponse, Transport, TransportError};

use crate::error::MockError;
use crate::options::MockBackendOption;
use crate::router::EndpointRouter;
use crate::server::{MockServer, ServerConfig};
use crate::transport::{EnforceHostTransport, UreqTransport};

/// Apply `options` in order to an empty router, stopping at the first
/// endpoint that cannot be registered.
pub fn build_router<I>(options: I) -> Result<EndpointRouter, MockError>
where
    I: IntoIterator<Item = MockBackendOption>,
{
    options
        .into_iter()
        .try_fold(EndpointRouter::new(), |router, option| option(router))
}

/// Start a mock GitHub backend and return a client transport wired to it.
///
/// ```no_run
/// use github_core::{GithubClient, Transport};
/// use github_mock::endpoints::GET_USERS_BY_USERNAME;
/// use github_mock::{new_mocked_client, with_request_match};
///
/// let mocked = new_mocked_client([with_request_match(
///     GET_USERS_BY_USERNAME,
///     [r#"{"login":"octocat"}"#],
/// )])?;
/// let github = GithubClient::default();
/// let response = mocked.send(github.build_get_user("octocat"))?;
/// let user = github.parse_get_user(response)?;
/// assert_eq!(user.login, "octocat");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn new_mocked_client<I>(options: I) -> Result<MockedClient, MockError>
where
    I: IntoIterator<Item = MockBackendOption>,
{
    MockedClient::with_config(ServerConfig::default(), options)
}

/// A running mock backend together with the transport that reaches it.
pub struct MockedClient {
    transport: EnforceHostTransport<UreqTransport>,
    server: MockServer,
}

impl MockedClient {
    pub fn with_config<I>(config: ServerConfig, options: I) -> Result<Self, MockError>
    where
        I: IntoIterator<Item = MockBackendOption>,
    {
        let server = MockServer::start(config, build_router(options)?)?;
        let transport = EnforceHostTransport::new(&server.url(), UreqTransport::new())?;
        Ok(Self { transport, server })
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn server_url(&self) -> String {
        self.server.url()
    }

    pub fn transport(&self) -> &EnforceHostTransport<UreqTransport> {
        &self.transport
    }

    /// Stop the backend and release its socket.
    pub fn shutdown(self) -> Result<(), MockError> {
        self.server.shutdown()
    }
}

impl Transport for MockedClient {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.transport.send(request)
    }
}
