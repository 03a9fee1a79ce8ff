use std::sync::Arc;

use http::Method;
use trellis_routing::ConverterRegistry;
use trellis_web::{handler_fn, App, Config, Dispatcher, MiddlewarePipeline, Request};

fn hello_world(_req: &Request) -> &'static str {
    "hello world"
}

fn main() {
    tracing_subscriber::fmt().init();

    let registry = Arc::new(ConverterRegistry::with_defaults());
    let mut app = App::new("hello", "/", registry);
    app.get("/", "hello_world", handler_fn(hello_world)).unwrap();

    let dispatcher = Dispatcher::new(app, MiddlewarePipeline::new(), Config::default());

    // a transport collaborator would feed inbound requests here
    let response = dispatcher.handle(Request::new(Method::GET, "/"));
    println!("{} {:?}", response.status(), response.body());
}
