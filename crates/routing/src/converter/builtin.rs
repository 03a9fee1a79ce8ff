//! The built-in converter set: `str`, `int`, `slug`, `uuid` and `path`.

use uuid::Uuid;

use crate::converter::Converter;
use crate::error::ConvertError;
use crate::value::ParamValue;

/// Matches any single path segment, yielding it verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrConverter;

impl Converter for StrConverter {
    fn pattern(&self) -> &str {
        "[^/]+"
    }

    fn parse(&self, raw: &str) -> Result<ParamValue, ConvertError> {
        Ok(ParamValue::Str(raw.to_owned()))
    }
}

/// Matches a run of decimal digits, yielding an `i64`.
///
/// Digit runs past `i64::MAX` fail to parse, which the matcher downgrades
/// to "no match".
#[derive(Debug, Clone, Copy, Default)]
pub struct IntConverter;

impl Converter for IntConverter {
    fn pattern(&self) -> &str {
        "[0-9]+"
    }

    fn parse(&self, raw: &str) -> Result<ParamValue, ConvertError> {
        raw.parse::<i64>().map(ParamValue::Int).map_err(|_| ConvertError::new("int", raw))
    }
}

/// Matches a slug: letters, digits, hyphens and underscores.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugConverter;

impl Converter for SlugConverter {
    fn pattern(&self) -> &str {
        "[-a-zA-Z0-9_]+"
    }

    fn parse(&self, raw: &str) -> Result<ParamValue, ConvertError> {
        Ok(ParamValue::Str(raw.to_owned()))
    }
}

/// Matches a canonical 36-character hyphenated lowercase hex UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidConverter;

impl Converter for UuidConverter {
    fn pattern(&self) -> &str {
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
    }

    fn parse(&self, raw: &str) -> Result<ParamValue, ConvertError> {
        Uuid::parse_str(raw).map(ParamValue::Uuid).map_err(|_| ConvertError::new("uuid", raw))
    }
}

/// Matches any non-empty remainder of the path, slashes included.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathConverter;

impl Converter for PathConverter {
    fn pattern(&self) -> &str {
        ".+"
    }

    fn parse(&self, raw: &str) -> Result<ParamValue, ConvertError> {
        Ok(ParamValue::Str(raw.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_parses_digits() {
        assert_eq!(IntConverter.parse("123").unwrap(), ParamValue::Int(123));
    }

    #[test]
    fn int_rejects_overflow() {
        // 20 digits, past i64::MAX
        assert!(IntConverter.parse("99999999999999999999").is_err());
    }

    #[test]
    fn uuid_parses_canonical_form() {
        let parsed = UuidConverter.parse("7d1d1866-9d94-4a0f-9d4a-7b3b6e2f0a4c").unwrap();
        assert_eq!(parsed.to_string(), "7d1d1866-9d94-4a0f-9d4a-7b3b6e2f0a4c");
    }

    #[test]
    fn str_keeps_text_verbatim() {
        assert_eq!(StrConverter.parse("hello").unwrap(), ParamValue::Str("hello".into()));
    }

    #[test]
    fn format_round_trips_int() {
        let value = IntConverter.parse("100").unwrap();
        assert_eq!(IntConverter.format(&value), "100");
    }
}
