use thiserror::Error;

/// Raised while registering a converter into a [`ConverterRegistry`].
///
/// [`ConverterRegistry`]: crate::ConverterRegistry
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("invalid converter: {reason}")]
    InvalidConverter { reason: String },
}

impl RegistryError {
    pub fn invalid_converter<S: ToString>(reason: S) -> Self {
        Self::InvalidConverter { reason: reason.to_string() }
    }
}

/// Raised while compiling a path template into a matching pattern.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("unknown converter key: {key:?}")]
    UnknownConverter { key: String },

    #[error("duplicate parameter name: {name:?}")]
    DuplicateParam { name: String },

    #[error("invalid parameter name: {name:?}")]
    InvalidParamName { name: String },

    #[error("pattern error: {source}")]
    Pattern {
        #[from]
        source: regex::Error,
    },
}

impl CompileError {
    pub fn unknown_converter<S: ToString>(key: S) -> Self {
        Self::UnknownConverter { key: key.to_string() }
    }

    pub fn duplicate_param<S: ToString>(name: S) -> Self {
        Self::DuplicateParam { name: name.to_string() }
    }

    pub fn invalid_param_name<S: ToString>(name: S) -> Self {
        Self::InvalidParamName { name: name.to_string() }
    }
}

/// Raised by [`Router`] registration and lookup.
///
/// [`Router`]: crate::Router
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("route already exists: {name:?} {template:?}")]
    RouteAlreadyExists { name: String, template: String },

    #[error("no route found")]
    RouteNotFound,

    #[error("route compilation failed: {source}")]
    Compile {
        #[from]
        source: CompileError,
    },
}

/// Raised while reversing a route back into a concrete path.
#[derive(Error, Debug)]
pub enum ReverseError {
    #[error("missing parameter for reverse: {name:?}")]
    MissingParam { name: String },
}

/// A captured path segment could not be turned into its typed value.
///
/// This never escapes route matching; a failed conversion downgrades the
/// whole match to "no match".
#[derive(Error, Debug)]
#[error("invalid value for {kind} converter: {raw:?}")]
pub struct ConvertError {
    kind: &'static str,
    raw: String,
}

impl ConvertError {
    pub fn new<S: ToString>(kind: &'static str, raw: S) -> Self {
        Self { kind, raw: raw.to_string() }
    }
}
