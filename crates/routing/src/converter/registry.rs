//! Converter registration and lookup.

use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::converter::builtin::{IntConverter, PathConverter, SlugConverter, StrConverter, UuidConverter};
use crate::converter::Converter;
use crate::error::RegistryError;
use crate::utils::to_snake_case;

/// Maps converter keys to the converters templates can reference.
///
/// The registry is an explicit object: build one during application setup,
/// share it behind an `Arc`, and treat it as read-only once serving starts.
/// Registering an existing key silently replaces the previous converter.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { converters: HashMap::new() }
    }

    /// Creates a registry seeded with the built-in converters:
    /// `str`, `int`, `slug`, `uuid` and `path`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("str", StrConverter).expect("builtin converter");
        registry.register("int", IntConverter).expect("builtin converter");
        registry.register("slug", SlugConverter).expect("builtin converter");
        registry.register("uuid", UuidConverter).expect("builtin converter");
        registry.register("path", PathConverter).expect("builtin converter");
        registry
    }

    /// Registers a converter under an explicit key.
    ///
    /// Fails when the key is empty or the converter's pattern fragment is
    /// empty or not a valid regex on its own.
    pub fn register<C>(&mut self, key: impl Into<String>, converter: C) -> Result<(), RegistryError>
    where
        C: Converter + 'static,
    {
        let key = key.into();
        if key.is_empty() {
            return Err(RegistryError::invalid_converter("key must be non-empty"));
        }

        let fragment = converter.pattern();
        if fragment.is_empty() {
            return Err(RegistryError::invalid_converter(format!("converter {key:?} has an empty pattern")));
        }
        if let Err(e) = Regex::new(&format!("^(?:{fragment})$")) {
            return Err(RegistryError::invalid_converter(format!("converter {key:?} pattern does not compile: {e}")));
        }

        self.converters.insert(key, Arc::new(converter));
        Ok(())
    }

    /// Registers a converter under a key inferred from its type name.
    ///
    /// The key is the type's last path segment, snake-cased, with a trailing
    /// `_converter` segment stripped: `DateConverter` registers as `date`.
    /// Returns the derived key.
    pub fn register_inferred<C>(&mut self) -> Result<String, RegistryError>
    where
        C: Converter + Default + 'static,
    {
        let name = type_name::<C>().rsplit("::").next().unwrap_or_default();
        let key = to_snake_case(name);
        let key = key.strip_suffix("_converter").unwrap_or(&key).to_owned();

        self.register(key.clone(), C::default())?;
        Ok(key)
    }

    /// Looks up a converter by key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn Converter>> {
        self.converters.get(key).cloned()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.converters.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ConverterRegistry").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::value::ParamValue;

    #[derive(Default)]
    struct DateConverter;

    impl Converter for DateConverter {
        fn pattern(&self) -> &str {
            "[0-9]{4}-[0-9]{2}-[0-9]{2}"
        }

        fn parse(&self, raw: &str) -> Result<ParamValue, ConvertError> {
            Ok(ParamValue::Str(raw.to_owned()))
        }
    }

    #[test]
    fn defaults_cover_builtin_keys() {
        let registry = ConverterRegistry::with_defaults();
        for key in ["str", "int", "slug", "uuid", "path"] {
            assert!(registry.get(key).is_some(), "missing builtin {key}");
        }
        assert!(registry.get("date").is_none());
    }

    #[test]
    fn register_rejects_empty_key() {
        let mut registry = ConverterRegistry::new();
        assert!(registry.register("", DateConverter).is_err());
    }

    #[test]
    fn register_rejects_broken_pattern() {
        struct Broken;
        impl Converter for Broken {
            fn pattern(&self) -> &str {
                "[unclosed"
            }
            fn parse(&self, raw: &str) -> Result<ParamValue, ConvertError> {
                Ok(ParamValue::Str(raw.to_owned()))
            }
        }

        let mut registry = ConverterRegistry::new();
        assert!(registry.register("broken", Broken).is_err());
    }

    #[test]
    fn register_overwrites_silently() {
        let mut registry = ConverterRegistry::with_defaults();
        registry.register("int", StrConverter).unwrap();
        assert_eq!(registry.get("int").unwrap().pattern(), "[^/]+");
    }

    #[test]
    fn inferred_key_strips_converter_suffix() {
        let mut registry = ConverterRegistry::new();
        let key = registry.register_inferred::<DateConverter>().unwrap();
        assert_eq!(key, "date");
        assert!(registry.get("date").is_some());
    }
}
