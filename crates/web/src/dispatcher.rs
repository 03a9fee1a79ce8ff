//! The boundary entry point composing routing, middleware and error mapping.

use http::{Method, StatusCode};
use tracing::{debug, error};
use trellis_routing::{PathParams, RouterError};

use crate::app::{App, UrlError};
use crate::config::Config;
use crate::container::Container;
use crate::handler::Handler;
use crate::middleware::MiddlewarePipeline;
use crate::request::Request;
use crate::response::{self, Response};

/// A source of routes the dispatcher can serve: a single [`App`] or a
/// [`Container`] of them.
pub trait Routes: Send + Sync {
    fn find(&self, path: &str, method: &Method) -> Result<(&dyn Handler, PathParams), RouterError>;

    fn url_for(&self, name: &str, params: &PathParams) -> Result<String, UrlError>;
}

impl Routes for App {
    fn find(&self, path: &str, method: &Method) -> Result<(&dyn Handler, PathParams), RouterError> {
        App::find(self, path, method)
    }

    fn url_for(&self, name: &str, params: &PathParams) -> Result<String, UrlError> {
        App::url_for(self, name, params)
    }
}

impl Routes for Container {
    fn find(&self, path: &str, method: &Method) -> Result<(&dyn Handler, PathParams), RouterError> {
        Container::find(self, path, method)
    }

    fn url_for(&self, name: &str, params: &PathParams) -> Result<String, UrlError> {
        Container::url_for(self, name, params)
    }
}

/// Serves requests against a route source through the middleware pipeline.
///
/// Construction consumes the pipeline and resolves both phases, so the
/// registration phase is over by the time serving starts: everything the
/// dispatcher touches afterwards is read-only and freely shareable across
/// concurrently handled requests.
pub struct Dispatcher<R: Routes> {
    routes: R,
    middleware: MiddlewarePipeline,
    config: Config,
}

impl<R: Routes> Dispatcher<R> {
    pub fn new(routes: R, mut middleware: MiddlewarePipeline, config: Config) -> Self {
        middleware.resolve_request();
        middleware.resolve_response();
        Self { routes, middleware, config }
    }

    pub fn routes(&self) -> &R {
        &self.routes
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handles one request, producing the response for the transport.
    ///
    /// Routing failures become a 404 and any handler failure becomes a 500;
    /// no error from this layer ever reaches the transport. The underlying
    /// cause of a 500 is logged, and exposed in the body only under
    /// `config.debug`.
    pub fn handle(&self, request: Request) -> Response {
        let mut request = request;
        for middleware in self.middleware.request_chain() {
            request = middleware.on_request(request);
        }

        let response = if self.config.host_allowed(request.host()) {
            self.dispatch(&mut request)
        } else {
            debug!(host = ?request.host(), "disallowed host");
            response::html(StatusCode::BAD_REQUEST, "Disallowed host.")
        };

        let mut response = response;
        for middleware in self.middleware.response_chain() {
            response = middleware.on_response(&request, response);
        }
        response
    }

    /// Reverses a route name into a concrete path.
    pub fn url_for(&self, name: &str, params: &PathParams) -> Result<String, UrlError> {
        self.routes.url_for(name, params)
    }

    fn dispatch(&self, request: &mut Request) -> Response {
        let (handler, params) = match self.routes.find(request.path(), request.method()) {
            Ok(hit) => hit,
            Err(RouterError::RouteNotFound) => {
                return response::html(StatusCode::NOT_FOUND, "Page not found.");
            }
            Err(e) => {
                error!(cause = %e, "route lookup failed");
                return response::html(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.");
            }
        };

        request.bind_params(params);

        match handler.invoke(request) {
            Ok(response) => response,
            Err(e) => {
                error!(cause = %e, method = %request.method(), path = %request.path(), "handler failed");
                if self.config.debug {
                    response::html(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                } else {
                    response::html(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.")
                }
            }
        }
    }
}
