//! Response construction helpers.
//!
//! The response representation is plain [`http::Response`] over [`Bytes`];
//! these helpers build the shapes the framework hands back to the transport
//! collaborator. Every constructor sets `Content-Type` and `Content-Length`,
//! and the default content type is `text/html; charset=utf-8`.

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};
use serde::Serialize;

/// The response representation returned to the transport boundary.
pub type Response = http::Response<Bytes>;

fn build(status: StatusCode, content_type: &str, body: Bytes) -> Response {
    let content_length = body.len();
    let mut response = http::Response::new(body);
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).expect("mime types are valid header values"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
    response
}

/// An HTML response with the given status.
pub fn html(status: StatusCode, body: impl Into<Bytes>) -> Response {
    build(status, mime::TEXT_HTML_UTF_8.as_ref(), body.into())
}

/// A `200 OK` HTML response, the framework default shape.
pub fn ok(body: impl Into<Bytes>) -> Response {
    html(StatusCode::OK, body)
}

/// A plain-text response with the given status.
pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Response {
    build(status, mime::TEXT_PLAIN_UTF_8.as_ref(), body.into())
}

/// A JSON response serialized from any `Serialize` value.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, serde_json::Error> {
    let body = serde_json::to_vec(value)?;
    Ok(build(status, mime::APPLICATION_JSON.as_ref(), Bytes::from(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_type(response: &Response) -> &str {
        response.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap()
    }

    #[test]
    fn default_shape_is_html_utf8() {
        let response = ok("hello");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), "text/html; charset=utf-8");
        assert_eq!(response.headers().get(CONTENT_LENGTH).unwrap(), "5");
        assert_eq!(response.body().as_ref(), b"hello");
    }

    #[test]
    fn text_sets_plain_content_type() {
        let response = text(StatusCode::OK, "42");
        assert_eq!(content_type(&response), "text/plain; charset=utf-8");
    }

    #[test]
    fn json_serializes_value() {
        let response = json(StatusCode::OK, &serde_json::json!({"err": true})).unwrap();

        assert_eq!(content_type(&response), "application/json");
        assert_eq!(response.body().as_ref(), br#"{"err":true}"#);
    }

    #[test]
    fn status_is_preserved() {
        let response = html(StatusCode::NOT_FOUND, "Page not found.");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
