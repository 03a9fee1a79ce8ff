//! A single registered route: compiled template, name, method set, handler.

use std::fmt;
use std::sync::Arc;

use http::Method;
use regex::Regex;
use tracing::trace;

use crate::compile::{compile_template, CompiledTemplate, TEMPLATE_TOKEN};
use crate::converter::{Converter, ConverterRegistry};
use crate::error::{CompileError, ReverseError};
use crate::path::canonicalize;
use crate::value::PathParams;

/// A compiled route, generic over the opaque handler it carries.
///
/// The matching pattern is always fully anchored: it matches the entire
/// canonical path, never a prefix or suffix of it.
pub struct Route<H> {
    template: String,
    name: String,
    methods: Vec<Method>,
    pattern: Regex,
    converters: Vec<(String, Arc<dyn Converter>)>,
    handler: H,
}

impl<H> Route<H> {
    /// Compiles a route from a canonical template.
    ///
    /// The template is normalized to canonical form before compilation, and
    /// the method set is deduplicated.
    pub fn new(
        template: &str,
        name: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
        handler: H,
        registry: &ConverterRegistry,
    ) -> Result<Self, CompileError> {
        let template = canonicalize(template);
        let CompiledTemplate { pattern, converters } = compile_template(&template, registry)?;

        let mut methods: Vec<Method> = methods.into_iter().collect();
        methods.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
        methods.dedup();

        Ok(Self { template, name: name.into(), methods, pattern, converters, handler })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Whether this route accepts the given method.
    pub fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// Matches a path against this route's pattern.
    ///
    /// The path is normalized to canonical form first. On a pattern match,
    /// every captured group is parsed by its converter; a conversion failure
    /// (e.g. a digit run past `i64::MAX` under the `int` converter)
    /// downgrades the whole attempt to "no match" so that later routes still
    /// get their turn.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let path = canonicalize(path);
        let captures = self.pattern.captures(&path)?;

        let mut params = PathParams::new();
        for (name, converter) in &self.converters {
            let raw = captures.name(name)?.as_str();
            match converter.parse(raw) {
                Ok(value) => params.insert(name.clone(), value),
                Err(e) => {
                    trace!(route = %self.name, cause = %e, "capture conversion failed, treating as no match");
                    return None;
                }
            }
        }

        Some(params)
    }

    /// Produces a concrete path by substituting `params` into the template.
    ///
    /// Substituted values are formatted by the placeholder's converter but
    /// not validated against its pattern.
    pub fn reverse(&self, params: &PathParams) -> Result<String, ReverseError> {
        let mut path = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(token) = TEMPLATE_TOKEN.captures(rest) {
            let whole = token.get(0).expect("captures always carry group 0");
            path.push_str(&rest[..whole.start()]);
            rest = &rest[whole.end()..];

            let parameter = token.name("parameter").expect("parameter group is not optional").as_str();
            let value = params
                .get(parameter)
                .ok_or_else(|| ReverseError::MissingParam { name: parameter.to_owned() })?;

            let converter = self
                .converters
                .iter()
                .find(|(name, _)| name == parameter)
                .map(|(_, converter)| converter)
                .expect("compiled template binds every placeholder");
            path.push_str(&converter.format(value));
        }

        path.push_str(rest);
        Ok(path)
    }
}

/// Two routes are the same rule iff their `(template, name, methods)`
/// triples are equal; the handler never takes part in equality.
impl<H> PartialEq for Route<H> {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template && self.name == other.name && self.methods == other.methods
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("template", &self.template)
            .field("name", &self.name)
            .field("methods", &self.methods)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ParamValue;

    fn route(template: &str) -> Route<()> {
        let registry = ConverterRegistry::with_defaults();
        Route::new(template, "test", [Method::GET], (), &registry).unwrap()
    }

    #[test]
    fn match_parses_typed_params() {
        let route = route("/user/<int:id>/");

        let params = route.match_path("/user/100/").unwrap();
        assert_eq!(params.get("id"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn match_normalizes_before_matching() {
        let route = route("/user/<int:id>/");

        assert!(route.match_path("user/100").is_some());
        assert!(route.match_path("/user/100").is_some());
    }

    #[test]
    fn match_rejects_wrong_shape() {
        let route = route("/user/<int:id>/");

        assert!(route.match_path("/user/abc/").is_none());
        assert!(route.match_path("/user/").is_none());
        assert!(route.match_path("/user/100/extra/").is_none());
    }

    #[test]
    fn match_is_anchored() {
        let route = route("/user/<int:id>/");

        assert!(route.match_path("/prefix/user/100/").is_none());
    }

    #[test]
    fn conversion_failure_is_no_match() {
        let route = route("/user/<int:id>/");

        // satisfies the digit pattern but overflows i64
        assert!(route.match_path("/user/99999999999999999999/").is_none());
    }

    #[test]
    fn reverse_substitutes_params() {
        let route = route("/user/<int:id>/");

        let path = route.reverse(&PathParams::new().with("id", 100i64)).unwrap();
        assert_eq!(path, "/user/100/");
    }

    #[test]
    fn reverse_without_placeholders_returns_template() {
        let route = route("/");
        assert_eq!(route.reverse(&PathParams::new()).unwrap(), "/");
    }

    #[test]
    fn reverse_missing_param_fails() {
        let route = route("/user/<int:id>/");

        let err = route.reverse(&PathParams::new()).unwrap_err();
        assert!(matches!(err, ReverseError::MissingParam { name } if name == "id"));
    }

    #[test]
    fn reverse_inverts_match() {
        let route = route("/blog/<slug:post>/comment/<int:id>/");

        let params = route.match_path("/blog/first-post/comment/7/").unwrap();
        assert_eq!(route.reverse(&params).unwrap(), "/blog/first-post/comment/7/");
    }

    #[test]
    fn equality_ignores_handler() {
        let registry = ConverterRegistry::with_defaults();
        let a = Route::new("/x/", "x", [Method::GET], 1u8, &registry).unwrap();
        let b = Route::new("/x/", "x", [Method::GET], 2u8, &registry).unwrap();
        let c = Route::new("/x/", "x", [Method::POST], 3u8, &registry).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn method_set_is_deduplicated() {
        let registry = ConverterRegistry::with_defaults();
        let a = Route::new("/x/", "x", [Method::GET, Method::GET], (), &registry).unwrap();
        let b = Route::new("/x/", "x", [Method::GET], (), &registry).unwrap();

        assert_eq!(a, b);
    }
}
