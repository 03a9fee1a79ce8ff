//! A named application: a router plus its registration surface.

use std::fmt;
use std::sync::Arc;

use http::Method;
use thiserror::Error;
use trellis_routing::{ConverterRegistry, PathParams, ReverseError, Router, RouterError};

use crate::handler::{BoxHandler, Handler};

/// Raised while reversing a route name into a concrete path.
#[derive(Error, Debug)]
pub enum UrlError {
    #[error("application not found: {name:?}")]
    AppNotFound { name: String },

    #[error("route lookup failed: {source}")]
    Route {
        #[from]
        source: RouterError,
    },

    #[error("reverse failed: {source}")]
    Reverse {
        #[from]
        source: ReverseError,
    },
}

/// One application: a name and the routes registered under its base path.
///
/// Every route registration carries an explicit, caller-provided name; the
/// framework never infers one from the handler.
pub struct App {
    name: String,
    router: Router<BoxHandler>,
}

impl App {
    pub fn new(name: impl Into<String>, base_path: impl Into<String>, registry: Arc<ConverterRegistry>) -> Self {
        Self { name: name.into(), router: Router::new(base_path, registry) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn router(&self) -> &Router<BoxHandler> {
        &self.router
    }

    /// Registers a route for the given methods.
    pub fn route<H>(
        &mut self,
        template: &str,
        name: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
        handler: H,
    ) -> Result<(), RouterError>
    where
        H: Handler + 'static,
    {
        self.router.add_route(template, name, methods, Box::new(handler))
    }

    /// Registers a GET route.
    pub fn get<H>(&mut self, template: &str, name: impl Into<String>, handler: H) -> Result<(), RouterError>
    where
        H: Handler + 'static,
    {
        self.route(template, name, [Method::GET], handler)
    }

    /// Registers a POST route.
    pub fn post<H>(&mut self, template: &str, name: impl Into<String>, handler: H) -> Result<(), RouterError>
    where
        H: Handler + 'static,
    {
        self.route(template, name, [Method::POST], handler)
    }

    /// Reverses a registered route name into a concrete path.
    pub fn url_for(&self, name: &str, params: &PathParams) -> Result<String, UrlError> {
        let route = self.router.find_by_name(name.trim())?;
        Ok(route.reverse(params)?)
    }

    pub(crate) fn find(&self, path: &str, method: &Method) -> Result<(&dyn Handler, PathParams), RouterError> {
        let (route, params) = self.router.at(path, method)?;
        Ok((route.handler().as_ref(), params))
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App").field("name", &self.name).field("router", &self.router).finish()
    }
}
