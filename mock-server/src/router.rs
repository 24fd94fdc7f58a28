//! Endpoint lookup and dispatch.
//!
//! # Responsibilities
//! - Bind handlers to endpoint descriptors
//! - Find the handler for a concrete (method, path)
//! - Answer unmatched requests with a GitHub-style 404
//!
//! # Design Decisions
//! - Registering a descriptor that is already present replaces its handler
//!   in place (last registration wins)
//! - Paths are matched by one [`matchit`] table per method, rebuilt from the
//!   ordered route list whenever a new descriptor is added
//! - A literal segment takes precedence over a parameter in the same
//!   position, so `/users/octocat` and `/users/{username}` coexist
//! - Templates matchit cannot tell apart (e.g. `/users/{id}` next to
//!   `/users/{name}`) are rejected at registration
//! - Paths are percent-decoded before matching
//! - Immutable once the server starts, so it is shared without locks

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use axum::response::Response;
use percent_encoding::percent_decode_str;
use tracing::{debug, warn};

use crate::endpoint::EndpointPattern;
use crate::envelope::not_found;
use crate::error::MockError;
use crate::handlers::{MockRequest, ResponseHandler};
use crate::template::{PathParams, PathTemplate};

struct Route {
    endpoint: EndpointPattern,
    template: PathTemplate,
    handler: Arc<dyn ResponseHandler>,
}

/// The result of a successful lookup.
pub struct RouteMatch<'a> {
    pub endpoint: &'a EndpointPattern,
    pub handler: &'a Arc<dyn ResponseHandler>,
    pub params: PathParams,
}

/// Maps endpoint descriptors to the handlers that serve them.
#[derive(Default)]
pub struct EndpointRouter {
    routes: Vec<Route>,
    // values index into `routes`
    tables: HashMap<Method, matchit::Router<usize>>,
}

impl EndpointRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `endpoint`, replacing any earlier binding of the
    /// same descriptor.
    ///
    /// Fails when the pattern is not supported or conflicts with a
    /// different descriptor already registered for the same method.
    pub fn register<H: ResponseHandler>(&mut self, endpoint: EndpointPattern, handler: H) -> Result<(), MockError> {
        self.register_shared(endpoint, Arc::new(handler))
    }

    pub fn register_shared(
        &mut self,
        endpoint: EndpointPattern,
        handler: Arc<dyn ResponseHandler>,
    ) -> Result<(), MockError> {
        if let Some(existing) = self.routes.iter_mut().find(|route| route.endpoint == endpoint) {
            debug!(%endpoint, "replacing mock handler");
            existing.handler = handler;
            return Ok(());
        }

        let template = PathTemplate::parse(endpoint.pattern())?;
        let mut table = matchit::Router::new();
        for (index, route) in self.routes.iter().enumerate() {
            if route.endpoint.method() == endpoint.method() {
                table
                    .insert(route.template.as_str(), index)
                    .map_err(|source| MockError::RouteConflict {
                        endpoint: route.endpoint.to_string(),
                        source,
                    })?;
            }
        }
        if let Err(source) = table.insert(template.as_str(), self.routes.len()) {
            warn!(%endpoint, error = %source, "rejecting conflicting mock endpoint");
            return Err(MockError::RouteConflict {
                endpoint: endpoint.to_string(),
                source,
            });
        }

        self.tables.insert(endpoint.method().clone(), table);
        self.routes.push(Route {
            endpoint,
            template,
            handler,
        });
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn route<H: ResponseHandler>(mut self, endpoint: EndpointPattern, handler: H) -> Result<Self, MockError> {
        self.register(endpoint, handler)?;
        Ok(self)
    }

    /// The route registered for `method` whose template matches the
    /// already-decoded `path`.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let matched = self.tables.get(method)?.at(path).ok()?;
        let route = self.routes.get(*matched.value)?;
        Some(RouteMatch {
            endpoint: &route.endpoint,
            handler: &route.handler,
            params: matched.params.iter().collect(),
        })
    }

    /// Serve `request` with its matching handler, or a 404 error envelope
    /// naming the unmatched path.
    pub fn dispatch(&self, mut request: MockRequest) -> Response {
        let path = percent_decode_str(request.uri().path())
            .decode_utf8_lossy()
            .into_owned();
        match self.match_route(request.method(), &path) {
            Some(matched) => {
                debug!(method = %request.method(), %path, endpoint = %matched.endpoint, "serving mock");
                request.extensions_mut().insert(matched.params);
                matched.handler.serve(&request)
            }
            None => {
                warn!(method = %request.method(), %path, "no mock registered");
                not_found(&path)
            }
        }
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointPattern> {
        self.routes.iter().map(|route| &route.endpoint)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for EndpointRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.endpoints().map(ToString::to_string)).finish()
    }
}
