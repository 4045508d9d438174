//! Domain-level error types for model-state-helper.
//!
//! All errors are typed with `thiserror` and point at the file or setting
//! that failed. The only tolerated failure is a missing counter/delay file,
//! which the infrastructure layer maps to the value 0 before an error is
//! ever constructed.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the calling test code.
#[derive(Error, Debug)]
pub enum StateError {
    /// Required environment variable is not set.
    #[error("environment variable {name} is not set")]
    MissingEnv { name: &'static str },

    /// Settings-file or path-resolution error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A counter or delay file held something other than a decimal integer.
    #[error("invalid integer in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseIntError,
    },
}

impl StateError {
    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias using `StateError`.
pub type Result<T> = std::result::Result<T, StateError>;
