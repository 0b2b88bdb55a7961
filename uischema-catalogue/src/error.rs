use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for catalogue operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// A type expression or annotation tag that does not match the grammar.
///
/// Carries the raw string as source code so the offset renders as a label.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message} at offset {offset} in '{raw}'")]
#[diagnostic(code(uischema::syntax_error))]
pub struct SyntaxError {
    #[source_code]
    pub raw: String,
    #[label("{message}")]
    pub span: SourceSpan,
    pub offset: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(raw: &str, offset: usize, len: usize, message: impl Into<String>) -> Self {
        Self {
            raw: raw.to_string(),
            span: SourceSpan::from((offset, len)),
            offset,
            message: message.into(),
        }
    }
}

/// Source context for error reporting.
///
/// Encapsulates the document content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a JSON error.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        Box::new(Error::Json {
            filename: self.filename.clone(),
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the catalogue path exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalogue")]
    #[diagnostic(code(uischema::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse JSON catalogue '{filename}'")]
    #[diagnostic(code(uischema::parse_error))]
    Json {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid type expression in '{location}'")]
    #[diagnostic(code(uischema::invalid_expression))]
    InvalidExpression {
        location: String,
        #[source]
        #[diagnostic_source]
        source: SyntaxError,
    },

    #[error("invalid definition '{name}': {message}")]
    #[diagnostic(code(uischema::invalid_definition))]
    Definition { name: String, message: String },

    #[error("supertype of '{name}' must name struct types, found '{expr}'")]
    #[diagnostic(
        code(uischema::invalid_supertype),
        help("use a type name, a generic application like 'UI.Layout(UI.Item)', or join them with '+'")
    )]
    InvalidSupertype { name: String, expr: String },
}

impl Error {
    /// Create a definition shape error
    pub fn definition(name: impl Into<String>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Definition {
            name: name.into(),
            message: message.into(),
        })
    }

    /// Wrap a syntax error with the definition/field it came from
    pub fn expression(location: impl Into<String>, source: SyntaxError) -> Box<Self> {
        Box::new(Error::InvalidExpression {
            location: location.into(),
            source,
        })
    }

    /// The underlying syntax error, if this error wraps one.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::InvalidExpression { source, .. } => Some(source),
            _ => None,
        }
    }
}
