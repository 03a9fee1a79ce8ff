//! The handler seam between routes and application code.

use std::error::Error;
use std::marker::PhantomData;

use crate::request::Request;
use crate::responder::Responder;
use crate::response::Response;

/// The opaque error type handlers may fail with; the dispatcher converts
/// any such failure into a 500 response at the boundary.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// The callable a route carries.
pub trait Handler: Send + Sync {
    fn invoke(&self, req: &Request) -> Result<Response, BoxError>;
}

/// The boxed form routes store.
pub type BoxHandler = Box<dyn Handler>;

/// Holder adapting a plain `Fn(&Request) -> impl Responder` into a handler.
pub struct FnHandler<F, R> {
    f: F,
    _phantom: PhantomData<fn() -> R>,
}

/// Wraps an infallible function as a route handler.
pub fn handler_fn<F, R>(f: F) -> FnHandler<F, R>
where
    F: Fn(&Request) -> R + Send + Sync,
    R: Responder,
{
    FnHandler { f, _phantom: PhantomData }
}

impl<F, R> Handler for FnHandler<F, R>
where
    F: Fn(&Request) -> R + Send + Sync,
    R: Responder,
{
    fn invoke(&self, req: &Request) -> Result<Response, BoxError> {
        Ok((self.f)(req).response_to(req))
    }
}

/// Holder adapting a fallible function into a handler.
pub struct TryFnHandler<F, R> {
    f: F,
    _phantom: PhantomData<fn() -> R>,
}

/// Wraps a fallible function as a route handler; an `Err` becomes a 500
/// response at the dispatch boundary.
pub fn try_handler_fn<F, R>(f: F) -> TryFnHandler<F, R>
where
    F: Fn(&Request) -> Result<R, BoxError> + Send + Sync,
    R: Responder,
{
    TryFnHandler { f, _phantom: PhantomData }
}

impl<F, R> Handler for TryFnHandler<F, R>
where
    F: Fn(&Request) -> Result<R, BoxError> + Send + Sync,
    R: Responder,
{
    fn invoke(&self, req: &Request) -> Result<Response, BoxError> {
        (self.f)(req).map(|responder| responder.response_to(req))
    }
}
