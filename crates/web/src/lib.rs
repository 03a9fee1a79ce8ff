//! The trellis web framework layer.
//!
//! Builds on [`trellis_routing`] with the pieces a transport collaborator
//! needs around the matching engine: a request/response representation, a
//! response-coercion trait for handler return values, a two-phase middleware
//! pipeline with deterministic ordering, applications and containers of
//! applications, and the dispatcher that ties them together behind a single
//! `handle(request) -> response` boundary.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use http::Method;
//! use trellis_routing::ConverterRegistry;
//! use trellis_web::{handler_fn, App, Config, Dispatcher, MiddlewarePipeline, Request};
//!
//! let registry = Arc::new(ConverterRegistry::with_defaults());
//! let mut app = App::new("demo", "/", registry);
//! app.get("/hello/<name>/", "hello", handler_fn(|req: &Request| {
//!     format!("Hello, {}!", req.param("name").and_then(|v| v.as_str()).unwrap_or("world"))
//! }))
//! .unwrap();
//!
//! let dispatcher = Dispatcher::new(app, MiddlewarePipeline::new(), Config::default());
//! let response = dispatcher.handle(Request::new(Method::GET, "/hello/rust/"));
//! assert_eq!(response.body().as_ref(), b"Hello, rust!");
//! ```

mod app;
mod config;
mod container;
mod dispatcher;
mod handler;
mod middleware;
mod request;
mod responder;

pub mod response;

pub use app::{App, UrlError};
pub use config::{Config, ConfigOverrides};
pub use container::Container;
pub use dispatcher::{Dispatcher, Routes};
pub use handler::{handler_fn, try_handler_fn, BoxError, BoxHandler, FnHandler, Handler, TryFnHandler};
pub use middleware::{request_fn, response_fn, MiddlewarePipeline, RequestMiddleware, ResponseMiddleware};
pub use request::Request;
pub use responder::{Json, Responder};
pub use response::Response;

pub use trellis_routing::{ConverterRegistry, ParamValue, PathParams};
