//! Aggregation of multiple applications under one dispatch surface.

use http::Method;
use trellis_routing::{PathParams, RouterError};

use crate::app::{App, UrlError};
use crate::handler::Handler;

/// An ordered collection of applications.
///
/// Matching tries each application in the order it was added and returns the
/// first success. Reversal requires a composite `app_name:route_name`.
#[derive(Debug, Default)]
pub struct Container {
    apps: Vec<App>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_app(&mut self, app: App) {
        self.apps.push(app);
    }

    pub fn apps(&self) -> &[App] {
        &self.apps
    }

    fn app_by_name(&self, name: &str) -> Option<&App> {
        self.apps.iter().find(|app| app.name() == name)
    }

    /// Reverses a composite `app_name:route_name` into a concrete path.
    pub fn url_for(&self, name: &str, params: &PathParams) -> Result<String, UrlError> {
        let (app_name, route_name) =
            name.trim().split_once(':').ok_or_else(|| UrlError::AppNotFound { name: name.to_owned() })?;

        let app = self.app_by_name(app_name).ok_or_else(|| UrlError::AppNotFound { name: app_name.to_owned() })?;
        app.url_for(route_name, params)
    }

    pub(crate) fn find(&self, path: &str, method: &Method) -> Result<(&dyn Handler, PathParams), RouterError> {
        for app in &self.apps {
            if let Ok(hit) = app.find(path, method) {
                return Ok(hit);
            }
        }
        Err(RouterError::RouteNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use trellis_routing::ConverterRegistry;

    use crate::handler::handler_fn;
    use crate::request::Request;

    fn container() -> Container {
        let registry = Arc::new(ConverterRegistry::with_defaults());

        let mut blog = App::new("blog", "/blog", Arc::clone(&registry));
        blog.get("/post/<slug:post>/", "post", handler_fn(|_req: &Request| "post")).unwrap();

        let mut shop = App::new("shop", "/shop", Arc::clone(&registry));
        shop.get("/item/<int:id>/", "item", handler_fn(|_req: &Request| "item")).unwrap();

        let mut container = Container::new();
        container.add_app(blog);
        container.add_app(shop);
        container
    }

    #[test]
    fn match_falls_through_apps_in_order() {
        let container = container();

        assert!(container.find("/blog/post/hello/", &Method::GET).is_ok());
        assert!(container.find("/shop/item/3/", &Method::GET).is_ok());
        assert!(matches!(container.find("/missing/", &Method::GET), Err(RouterError::RouteNotFound)));
    }

    #[test]
    fn url_for_requires_composite_name() {
        let container = container();

        let path = container.url_for("shop:item", &PathParams::new().with("id", 3i64)).unwrap();
        assert_eq!(path, "/shop/item/3/");

        assert!(matches!(container.url_for("item", &PathParams::new()), Err(UrlError::AppNotFound { .. })));
        assert!(matches!(container.url_for("mall:item", &PathParams::new()), Err(UrlError::AppNotFound { .. })));
    }
}
