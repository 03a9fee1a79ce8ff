//! An ordered route collection under a base path prefix.

use std::fmt;
use std::sync::Arc;

use http::Method;

use crate::converter::ConverterRegistry;
use crate::error::RouterError;
use crate::path::join;
use crate::route::Route;
use crate::value::PathParams;

/// Routes registered under one base path, matched in registration order.
///
/// The router is populated during application setup and treated as read-only
/// while serving; matching never mutates it, so it can be shared freely
/// across concurrently handled requests.
pub struct Router<H> {
    base_path: String,
    registry: Arc<ConverterRegistry>,
    routes: Vec<Route<H>>,
}

impl<H> Router<H> {
    pub fn new(base_path: impl Into<String>, registry: Arc<ConverterRegistry>) -> Self {
        Self { base_path: base_path.into(), registry, routes: Vec::new() }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    /// Registers a route, prepending the base path to its template.
    ///
    /// Rejects a route whose `(template, name, methods)` triple is already
    /// registered. Registration order is preserved and semantically
    /// significant: matching scans in this order and the first hit wins.
    pub fn add_route(
        &mut self,
        template: &str,
        name: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
        handler: H,
    ) -> Result<(), RouterError> {
        let template = join(&self.base_path, template);
        let route = Route::new(&template, name, methods, handler, &self.registry)?;

        if self.routes.iter().any(|existing| existing == &route) {
            return Err(RouterError::RouteAlreadyExists {
                name: route.name().to_owned(),
                template: route.template().to_owned(),
            });
        }

        self.routes.push(route);
        Ok(())
    }

    /// Finds the first route accepting `method` whose pattern matches `path`.
    pub fn at(&self, path: &str, method: &Method) -> Result<(&Route<H>, PathParams), RouterError> {
        for route in &self.routes {
            if !route.allows(method) {
                continue;
            }
            if let Some(params) = route.match_path(path) {
                return Ok((route, params));
            }
        }
        Err(RouterError::RouteNotFound)
    }

    /// Finds a route by its registered name.
    pub fn find_by_name(&self, name: &str) -> Result<&Route<H>, RouterError> {
        self.routes.iter().find(|route| route.name() == name).ok_or(RouterError::RouteNotFound)
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("base_path", &self.base_path).field("routes", &self.routes.len()).finish()
    }
}
