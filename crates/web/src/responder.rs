//! Response coercion that turns handler return values into HTTP responses.
//!
//! Handlers return whatever is natural for them; the [`Responder`] trait
//! defines the fixed coercion table the dispatcher applies afterwards:
//! strings and numbers become plain-text responses, serializable values
//! wrapped in [`Json`] (and raw [`serde_json::Value`]s) become JSON
//! responses, and pre-built responses pass through unchanged.

use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::request::Request;
use crate::response::{self, Response};

/// A type that can be converted into an HTTP response.
///
/// Types implementing this trait can be returned directly from request
/// handlers and will be coerced into responses by the dispatcher.
pub trait Responder {
    fn response_to(self, req: &Request) -> Response;
}

/// Marks a serializable value as a JSON response.
#[derive(Debug, Clone, Copy)]
pub struct Json<T>(pub T);

impl<T: Serialize> Responder for Json<T> {
    fn response_to(self, _req: &Request) -> Response {
        match response::json(StatusCode::OK, &self.0) {
            Ok(response) => response,
            Err(e) => {
                error!(cause = %e, "response serialization failed");
                response::html(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.")
            }
        }
    }
}

/// Raw JSON values serialize directly.
impl Responder for serde_json::Value {
    fn response_to(self, req: &Request) -> Response {
        Json(self).response_to(req)
    }
}

/// Result allows handlers to return fallible coercions; both variants must
/// be responders themselves.
impl<T: Responder, E: Responder> Responder for Result<T, E> {
    fn response_to(self, req: &Request) -> Response {
        match self {
            Ok(t) => t.response_to(req),
            Err(e) => e.response_to(req),
        }
    }
}

/// None coerces to an empty response.
impl<T: Responder> Responder for Option<T> {
    fn response_to(self, req: &Request) -> Response {
        match self {
            Some(t) => t.response_to(req),
            None => Response::new(Bytes::new()),
        }
    }
}

/// Pre-built responses pass through unchanged.
impl Responder for Response {
    fn response_to(self, _req: &Request) -> Response {
        self
    }
}

/// (StatusCode, T) overrides the status of the coerced inner response.
impl<T: Responder> Responder for (StatusCode, T) {
    fn response_to(self, req: &Request) -> Response {
        let (status, responder) = self;
        let mut response = responder.response_to(req);
        *response.status_mut() = status;
        response
    }
}

/// (T, StatusCode) - same as above but with reversed order.
impl<T: Responder> Responder for (T, StatusCode) {
    fn response_to(self, req: &Request) -> Response {
        let (responder, status) = self;
        (status, responder).response_to(req)
    }
}

impl<T: Responder> Responder for Box<T> {
    fn response_to(self, req: &Request) -> Response {
        (*self).response_to(req)
    }
}

impl Responder for () {
    fn response_to(self, _req: &Request) -> Response {
        Response::new(Bytes::new())
    }
}

impl Responder for &'static str {
    fn response_to(self, _req: &Request) -> Response {
        response::text(StatusCode::OK, self)
    }
}

impl Responder for String {
    fn response_to(self, _req: &Request) -> Response {
        response::text(StatusCode::OK, self)
    }
}

macro_rules! number_responder {
    ($($ty:ty),*) => {
        $(
            impl Responder for $ty {
                fn response_to(self, _req: &Request) -> Response {
                    response::text(StatusCode::OK, self.to_string())
                }
            }
        )*
    };
}

number_responder!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
