//! Route compilation and matching with pluggable parameter converters.
//!
//! This crate is the pure matching engine of the trellis framework. It turns
//! declarative path templates such as `/user/<int:id>/` into fully anchored
//! patterns with typed capture groups, matches inbound canonical paths
//! against an ordered route set, and reverses a route name plus parameters
//! back into a concrete path.
//!
//! Nothing in here performs I/O or blocks: build a [`ConverterRegistry`] and
//! a [`Router`] during setup, then share them read-only while serving.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use http::Method;
//! use trellis_routing::{ConverterRegistry, PathParams, Router};
//!
//! let registry = Arc::new(ConverterRegistry::with_defaults());
//! let mut router: Router<&str> = Router::new("/", registry);
//! router.add_route("/user/<int:id>/", "get_user", [Method::GET], "handler").unwrap();
//!
//! let (route, params) = router.at("/user/100/", &Method::GET).unwrap();
//! assert_eq!(params.get("id").and_then(|v| v.as_int()), Some(100));
//!
//! let path = route.reverse(&PathParams::new().with("id", 100i64)).unwrap();
//! assert_eq!(path, "/user/100/");
//! ```

mod compile;
mod route;
mod router;
mod value;

pub mod converter;
pub mod error;
pub mod path;
pub mod utils;

pub use compile::{compile_template, CompiledTemplate};
pub use converter::{Converter, ConverterRegistry};
pub use error::{CompileError, ConvertError, RegistryError, ReverseError, RouterError};
pub use route::Route;
pub use router::Router;
pub use value::{ParamValue, PathParams};
