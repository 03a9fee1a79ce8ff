//! The two-phase middleware pipeline.
//!
//! Middleware registers into one of two independently managed phases:
//! request-phase entries transform the inbound request before routing,
//! response-phase entries transform the request/response pair after handler
//! execution. Each entry may carry an explicit priority; resolution sorts
//! prioritized entries ascending (stably) and appends unprioritized entries
//! in registration order, so the execution order is deterministic and
//! repeatable. The resolved order is cached behind an explicit `Option` and
//! the cache is cleared by every new registration into that phase.

use std::fmt;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

/// Transforms the inbound request before route lookup.
pub trait RequestMiddleware: Send + Sync {
    fn on_request(&self, req: Request) -> Request;
}

/// Transforms the outbound response after handler execution.
pub trait ResponseMiddleware: Send + Sync {
    fn on_response(&self, req: &Request, resp: Response) -> Response;
}

struct FnRequestMiddleware<F>(F);

impl<F: Fn(Request) -> Request + Send + Sync> RequestMiddleware for FnRequestMiddleware<F> {
    fn on_request(&self, req: Request) -> Request {
        (self.0)(req)
    }
}

/// Wraps a closure as request-phase middleware.
pub fn request_fn<F>(f: F) -> impl RequestMiddleware
where
    F: Fn(Request) -> Request + Send + Sync,
{
    FnRequestMiddleware(f)
}

struct FnResponseMiddleware<F>(F);

impl<F: Fn(&Request, Response) -> Response + Send + Sync> ResponseMiddleware for FnResponseMiddleware<F> {
    fn on_response(&self, req: &Request, resp: Response) -> Response {
        (self.0)(req, resp)
    }
}

/// Wraps a closure as response-phase middleware.
pub fn response_fn<F>(f: F) -> impl ResponseMiddleware
where
    F: Fn(&Request, Response) -> Response + Send + Sync,
{
    FnResponseMiddleware(f)
}

struct Entry<M: ?Sized> {
    name: String,
    order: Option<i32>,
    callable: Arc<M>,
}

/// One phase: registered entries plus the resolved-order cache.
struct Phase<M: ?Sized> {
    entries: Vec<Entry<M>>,
    resolved: Option<Vec<Arc<M>>>,
}

impl<M: ?Sized> Phase<M> {
    fn new() -> Self {
        Self { entries: Vec::new(), resolved: None }
    }

    fn register(&mut self, name: String, callable: Arc<M>, order: Option<i32>) {
        self.entries.push(Entry { name, order, callable });
        self.resolved = None;
    }

    fn compute(&self) -> Vec<Arc<M>> {
        let mut ordered: Vec<&Entry<M>> = self.entries.iter().filter(|e| e.order.is_some()).collect();
        ordered.sort_by_key(|e| e.order);

        let unordered = self.entries.iter().filter(|e| e.order.is_none());
        ordered.into_iter().chain(unordered).map(|e| Arc::clone(&e.callable)).collect()
    }

    fn resolve(&mut self) -> &[Arc<M>] {
        if self.resolved.is_none() {
            self.resolved = Some(self.compute());
        }
        self.resolved.as_deref().expect("cache was just filled")
    }

    /// Read-only view of the execution order: the cached order when valid,
    /// a fresh computation otherwise.
    fn chain(&self) -> Vec<Arc<M>> {
        match &self.resolved {
            Some(resolved) => resolved.clone(),
            None => self.compute(),
        }
    }

    fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

/// The two independently managed middleware phases.
///
/// Register during application setup; the dispatcher resolves both phases
/// when it takes ownership, after which the chains are only read. Concurrent
/// registration while serving is unsupported.
pub struct MiddlewarePipeline {
    request: Phase<dyn RequestMiddleware>,
    response: Phase<dyn ResponseMiddleware>,
}

impl MiddlewarePipeline {
    pub fn new() -> Self {
        Self { request: Phase::new(), response: Phase::new() }
    }

    /// Registers request-phase middleware, invalidating that phase's cache.
    pub fn register_request<M>(&mut self, name: impl Into<String>, middleware: M, order: Option<i32>)
    where
        M: RequestMiddleware + 'static,
    {
        self.request.register(name.into(), Arc::new(middleware), order);
    }

    /// Registers response-phase middleware, invalidating that phase's cache.
    pub fn register_response<M>(&mut self, name: impl Into<String>, middleware: M, order: Option<i32>)
    where
        M: ResponseMiddleware + 'static,
    {
        self.response.register(name.into(), Arc::new(middleware), order);
    }

    /// Resolves and caches the request-phase execution order.
    pub fn resolve_request(&mut self) -> &[Arc<dyn RequestMiddleware>] {
        self.request.resolve()
    }

    /// Resolves and caches the response-phase execution order.
    pub fn resolve_response(&mut self) -> &[Arc<dyn ResponseMiddleware>] {
        self.response.resolve()
    }

    /// The request-phase chain in execution order.
    pub fn request_chain(&self) -> Vec<Arc<dyn RequestMiddleware>> {
        self.request.chain()
    }

    /// The response-phase chain in execution order.
    pub fn response_chain(&self) -> Vec<Arc<dyn ResponseMiddleware>> {
        self.response.chain()
    }

    pub fn request_names(&self) -> Vec<&str> {
        self.request.names()
    }

    pub fn response_names(&self) -> Vec<&str> {
        self.response.names()
    }
}

impl Default for MiddlewarePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MiddlewarePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewarePipeline")
            .field("request", &self.request.names())
            .field("response", &self.response.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    /// Tags the request with its own marker so execution order is observable.
    struct Tag(&'static str);

    #[derive(Clone, Default)]
    struct Seen(Vec<&'static str>);

    impl RequestMiddleware for Tag {
        fn on_request(&self, mut req: Request) -> Request {
            let mut seen = req.extensions().get::<Seen>().cloned().unwrap_or_default();
            seen.0.push(self.0);
            req.extensions_mut().insert(seen);
            req
        }
    }

    fn run_chain(pipeline: &MiddlewarePipeline) -> Vec<&'static str> {
        let mut req = Request::new(Method::GET, "/");
        for middleware in pipeline.request_chain() {
            req = middleware.on_request(req);
        }
        req.extensions().get::<Seen>().cloned().unwrap_or_default().0
    }

    #[test]
    fn ordered_entries_precede_unordered() {
        let mut pipeline = MiddlewarePipeline::new();
        pipeline.register_request("a", Tag("a"), Some(5));
        pipeline.register_request("b", Tag("b"), None);
        pipeline.register_request("c", Tag("c"), Some(1));
        pipeline.register_request("d", Tag("d"), None);

        assert_eq!(run_chain(&pipeline), ["c", "a", "b", "d"]);
    }

    #[test]
    fn ties_keep_registration_order() {
        let mut pipeline = MiddlewarePipeline::new();
        pipeline.register_request("a", Tag("a"), Some(1));
        pipeline.register_request("b", Tag("b"), Some(1));
        pipeline.register_request("c", Tag("c"), Some(0));

        assert_eq!(run_chain(&pipeline), ["c", "a", "b"]);
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut pipeline = MiddlewarePipeline::new();
        pipeline.register_request("a", Tag("a"), None);

        let first: Vec<_> = pipeline.resolve_request().to_vec();
        let second: Vec<_> = pipeline.resolve_request().to_vec();
        assert_eq!(first.len(), second.len());
        assert!(Arc::ptr_eq(&first[0], &second[0]));
    }

    #[test]
    fn registration_invalidates_cache() {
        let mut pipeline = MiddlewarePipeline::new();
        pipeline.register_request("b", Tag("b"), None);
        pipeline.resolve_request();

        pipeline.register_request("a", Tag("a"), Some(1));
        assert_eq!(run_chain(&pipeline), ["a", "b"]);
    }

    #[test]
    fn phases_are_independent() {
        let mut pipeline = MiddlewarePipeline::new();
        pipeline.register_request("req", Tag("req"), None);
        pipeline.register_response("resp", response_fn(|_req, resp| resp), None);

        assert_eq!(pipeline.request_names(), ["req"]);
        assert_eq!(pipeline.response_names(), ["resp"]);
        assert_eq!(pipeline.request_chain().len(), 1);
        assert_eq!(pipeline.response_chain().len(), 1);
    }
}
