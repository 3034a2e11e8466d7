//! Error types for mask compilation and catalog loading.
//!
//! Only setup can fail. Once a [`CompiledFormat`](crate::CompiledFormat)
//! exists, edits are corrected or cleared in place and never produce an error.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while building a catalog or compiling a template.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    /// The template ends with a `%` that has no token code after it.
    #[error("malformed template '{template}': unterminated '%' at position {position}")]
    MalformedTemplate { template: String, position: usize },

    /// The template contains no field token at all.
    #[error("template '{0}' contains no field tokens")]
    EmptyTemplate(String),

    /// A field code in the template has no descriptor in the catalog.
    #[error("unrecognized field '%{code}' in template '{template}'")]
    UnrecognizedField { code: char, template: String },

    /// A catalog lookup for a code that is not registered.
    #[error("unknown token code '{0}'")]
    UnknownToken(char),

    /// A descriptor breaks one of the catalog invariants.
    #[error("invalid descriptor for '{code}': {reason}")]
    InvalidDescriptor { code: char, reason: String },

    /// A catalog file with an extension we cannot parse.
    #[error("unsupported catalog file '{}': expected .yaml, .yml or .json", .0.display())]
    UnsupportedConfig(PathBuf),

    /// A catalog document failed to parse.
    #[error("{}", config_message(.path, .message))]
    Config {
        path: Option<PathBuf>,
        message: String,
    },

    /// A catalog file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MaskError {
    /// Create an invalid-descriptor error.
    pub fn invalid(code: char, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            code,
            reason: reason.into(),
        }
    }

    /// Create a catalog parse error.
    pub fn config(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path,
            message: message.into(),
        }
    }
}

fn config_message(path: &Option<PathBuf>, message: &str) -> String {
    match path {
        Some(path) => format!("invalid catalog '{}': {}", path.display(), message),
        None => format!("invalid catalog: {}", message),
    }
}

/// Result type for mask operations.
pub type Result<T> = std::result::Result<T, MaskError>;
