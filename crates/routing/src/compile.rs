//! Path template compilation.
//!
//! A template mixes literal text with placeholders of the form `<name>` or
//! `<converter_key:name>`, e.g. `/user/<int:id>/`. Compilation turns it into
//! a fully anchored regex with one named capture group per placeholder, plus
//! the ordered list of converters those groups feed.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::converter::{Converter, ConverterRegistry};
use crate::error::CompileError;

/// Recognizes one placeholder token, e.g. `<name>` or `<str:name>`.
pub(crate) static TEMPLATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(?:(?P<converter>[^>:]+):)?(?P<parameter>[^>]+)>").expect("placeholder token pattern"));

/// The converter key used when a placeholder carries none.
const DEFAULT_CONVERTER: &str = "str";

/// The compiled form of a path template.
pub struct CompiledTemplate {
    /// Fully anchored pattern matching the whole canonical path.
    pub pattern: Regex,
    /// Placeholder names and their converters, in template order.
    pub converters: Vec<(String, Arc<dyn Converter>)>,
}

impl std::fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.converters.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("CompiledTemplate").field("pattern", &self.pattern.as_str()).field("params", &names).finish()
    }
}

/// Compiles a canonical path template against a converter registry.
///
/// Unknown converter keys, parameter names that cannot name a capture group
/// and duplicated parameter names are all hard failures; registration-time
/// errors must halt setup rather than surface during serving.
pub fn compile_template(template: &str, registry: &ConverterRegistry) -> Result<CompiledTemplate, CompileError> {
    let mut pattern = String::with_capacity(template.len() + 16);
    pattern.push('^');

    let mut converters: Vec<(String, Arc<dyn Converter>)> = Vec::new();
    let mut rest = template;

    while let Some(token) = TEMPLATE_TOKEN.captures(rest) {
        let whole = token.get(0).expect("captures always carry group 0");
        pattern.push_str(&regex::escape(&rest[..whole.start()]));
        rest = &rest[whole.end()..];

        let parameter = token.name("parameter").expect("parameter group is not optional").as_str();
        if !is_valid_param_name(parameter) {
            return Err(CompileError::invalid_param_name(parameter));
        }
        if converters.iter().any(|(name, _)| name == parameter) {
            return Err(CompileError::duplicate_param(parameter));
        }

        let key = token.name("converter").map_or(DEFAULT_CONVERTER, |m| m.as_str());
        let converter = registry.get(key).ok_or_else(|| CompileError::unknown_converter(key))?;

        pattern.push_str("(?P<");
        pattern.push_str(parameter);
        pattern.push('>');
        pattern.push_str(converter.pattern());
        pattern.push(')');
        converters.push((parameter.to_owned(), converter));
    }

    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    let pattern = Regex::new(&pattern)?;
    Ok(CompiledTemplate { pattern, converters })
}

/// Capture group names are restricted to `[A-Za-z_][A-Za-z0-9_]*`.
fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_typed_placeholder() {
        let registry = ConverterRegistry::with_defaults();
        let compiled = compile_template("/user/<int:id>/", &registry).unwrap();

        assert_eq!(compiled.pattern.as_str(), "^/user/(?P<id>[0-9]+)/$");
        assert_eq!(compiled.converters.len(), 1);
        assert_eq!(compiled.converters[0].0, "id");
    }

    #[test]
    fn compiles_literal_only_template() {
        let registry = ConverterRegistry::with_defaults();
        let compiled = compile_template("/", &registry).unwrap();

        assert_eq!(compiled.pattern.as_str(), "^/$");
        assert!(compiled.converters.is_empty());
    }

    #[test]
    fn bare_placeholder_defaults_to_str() {
        let registry = ConverterRegistry::with_defaults();
        let compiled = compile_template("/hello/<name>/", &registry).unwrap();

        assert_eq!(compiled.pattern.as_str(), "^/hello/(?P<name>[^/]+)/$");
    }

    #[test]
    fn escapes_literal_text() {
        let registry = ConverterRegistry::with_defaults();
        let compiled = compile_template("/v1.0/<int:id>/", &registry).unwrap();

        assert_eq!(compiled.pattern.as_str(), r"^/v1\.0/(?P<id>[0-9]+)/$");
    }

    #[test]
    fn unknown_converter_is_a_hard_failure() {
        let registry = ConverterRegistry::with_defaults();
        let err = compile_template("/when/<date:day>/", &registry).unwrap_err();

        assert!(matches!(err, CompileError::UnknownConverter { key } if key == "date"));
    }

    #[test]
    fn duplicate_parameter_is_a_hard_failure() {
        let registry = ConverterRegistry::with_defaults();
        let err = compile_template("/pair/<int:id>/<int:id>/", &registry).unwrap_err();

        assert!(matches!(err, CompileError::DuplicateParam { name } if name == "id"));
    }

    #[test]
    fn invalid_parameter_name_is_a_hard_failure() {
        let registry = ConverterRegistry::with_defaults();
        let err = compile_template("/user/<int:user-id>/", &registry).unwrap_err();

        assert!(matches!(err, CompileError::InvalidParamName { .. }));
    }

    #[test]
    fn multiple_placeholders_keep_template_order() {
        let registry = ConverterRegistry::with_defaults();
        let compiled = compile_template("/blog/<slug:post>/comment/<int:id>/", &registry).unwrap();

        let names: Vec<&str> = compiled.converters.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["post", "id"]);
        assert_eq!(compiled.pattern.as_str(), "^/blog/(?P<post>[-a-zA-Z0-9_]+)/comment/(?P<id>[0-9]+)/$");
    }
}
