//! The request representation handed to middleware and handlers.
//!
//! A [`Request`] is built by the transport collaborator from the inbound
//! method and target, flows through the request-phase middleware chain, has
//! its path parameters bound by the dispatcher after route matching, and is
//! finally handed to the handler.

use http::header::HOST;
use http::{Extensions, HeaderMap, HeaderName, HeaderValue, Method};
use trellis_routing::{ParamValue, PathParams};

/// An inbound request: method, path, parsed query, headers and, once a route
/// matched, the typed path parameters.
#[derive(Debug, Default)]
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    extensions: Extensions,
    params: PathParams,
}

impl Request {
    /// Builds a request from a method and a request target.
    ///
    /// The target is split at the first `?`; everything after it is parsed
    /// as an urlencoded query string. Malformed query text parses to an
    /// empty pair list rather than failing the request.
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, serde_urlencoded::from_str(query).unwrap_or_default()),
            None => (target, Vec::new()),
        };

        Self {
            method,
            path: path.to_owned(),
            query,
            headers: HeaderMap::new(),
            extensions: Extensions::new(),
            params: PathParams::new(),
        }
    }

    /// Chaining form of header insertion, handy when building requests.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query pairs in the order they appeared in the target.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// The first query value registered under `name`.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Middleware-visible request state, keyed by type.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// The `Host` header value, when present and valid UTF-8.
    pub fn host(&self) -> Option<&str> {
        self.headers.get(HOST).and_then(|v| v.to_str().ok())
    }

    /// Typed path parameters bound by the dispatcher after route matching.
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Binds the parameters a matched route captured from the path.
    pub fn bind_params(&mut self, params: PathParams) {
        self.params = params;
    }
}
