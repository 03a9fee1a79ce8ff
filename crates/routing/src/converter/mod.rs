//! Pluggable parameter converters.
//!
//! A converter is the capability bundle behind a typed placeholder: the regex
//! fragment recognizing valid path text, the parse step turning captured text
//! into a [`ParamValue`], and the format step rendering a value back into its
//! URL form for reversal.

use crate::error::ConvertError;
use crate::value::ParamValue;

mod builtin;
mod registry;

pub use builtin::{IntConverter, PathConverter, SlugConverter, StrConverter, UuidConverter};
pub use registry::ConverterRegistry;

/// A pluggable translator between path-segment text and a typed value.
///
/// `pattern` must be a plain regex fragment: no anchors and no capture
/// groups, since the compiler wraps it in a named group of its own.
pub trait Converter: Send + Sync {
    /// The regex fragment recognizing valid text for this converter.
    fn pattern(&self) -> &str;

    /// Parses captured path text into its typed value.
    fn parse(&self, raw: &str) -> Result<ParamValue, ConvertError>;

    /// Renders a typed value back into its URL form.
    ///
    /// The rendered text is not re-validated against [`pattern`]; reversal
    /// trusts the caller to supply a value of the right shape.
    ///
    /// [`pattern`]: Self::pattern
    fn format(&self, value: &ParamValue) -> String {
        value.to_string()
    }
}
