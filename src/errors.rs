//! Shared error types for the library.
//!
//! Only structurally invalid calls surface as errors. Data-quality problems
//! (missing fields, zero denominators, malformed dates) are resolved to
//! placeholders and reported through [`crate::diagnostics::DiagnosticSink`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for labstats operations
#[derive(Debug, Error)]
pub enum Error {
    /// The input document does not have the shape of a record collection
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A threshold table, range table or precision failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        path: Option<PathBuf>,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error with path context
    pub fn configuration(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Whether the user can fix the error by editing input or config
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::Validation(_) | Self::Configuration { .. } | Self::Toml(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
