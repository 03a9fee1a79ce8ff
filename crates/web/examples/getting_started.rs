use std::sync::Arc;

use http::Method;
use serde::Serialize;
use trellis_routing::{ConverterRegistry, PathParams};
use trellis_web::{handler_fn, request_fn, response_fn, App, Config, Dispatcher, Json, MiddlewarePipeline, Request};

#[derive(Serialize)]
struct User {
    id: i64,
    name: &'static str,
}

fn get_user(req: &Request) -> Json<User> {
    let id = req.param("id").and_then(|v| v.as_int()).unwrap_or_default();
    Json(User { id, name: "ferris" })
}

fn home(_req: &Request) -> &'static str {
    "welcome"
}

fn main() {
    tracing_subscriber::fmt().init();

    let registry = Arc::new(ConverterRegistry::with_defaults());
    let mut app = App::new("demo", "/", registry);
    app.get("/", "home", handler_fn(home)).unwrap();
    app.get("/user/<int:id>/", "get_user", handler_fn(get_user)).unwrap();

    let mut middleware = MiddlewarePipeline::new();
    middleware.register_request(
        "trace",
        request_fn(|req| {
            tracing::info!(method = %req.method(), path = %req.path(), "inbound");
            req
        }),
        Some(1),
    );
    middleware.register_response(
        "server-header",
        response_fn(|_req, mut resp| {
            resp.headers_mut().insert("server", http::HeaderValue::from_static("trellis"));
            resp
        }),
        None,
    );

    let dispatcher = Dispatcher::new(app, middleware, Config::default());

    for target in ["/", "/user/100/", "/user/abc/"] {
        let response = dispatcher.handle(Request::new(Method::GET, target));
        println!("GET {target} -> {} {:?}", response.status(), response.body());
    }

    let path = dispatcher.url_for("get_user", &PathParams::new().with("id", 100i64)).unwrap();
    println!("url_for(get_user, id=100) -> {path}");
}
