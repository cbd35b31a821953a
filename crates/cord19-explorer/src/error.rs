//! Error types for the CORD-19 explorer.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Source errors never escape the resolver: each one only advances the fallback chain.

use std::path::PathBuf;

/// Errors from a single data source tier.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// File missing or unreadable.
    #[error("Source unavailable: {path}: {source}")]
    Unavailable {
        /// Path that could not be opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// CSV framing or decoding error.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the tier cannot work without is absent.
    #[error("Missing required column '{column}' in {source_name}")]
    MissingColumn {
        /// Column name
        column: &'static str,
        /// Human-readable source name
        source_name: String,
    },
}

impl SourceError {
    /// Create an unavailable error for a path.
    #[must_use]
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unavailable { path: path.into(), source }
    }

    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(column: &'static str, source_name: impl Into<String>) -> Self {
        Self::MissingColumn { column, source_name: source_name.into() }
    }

    /// Returns true if the file itself was absent rather than unreadable or malformed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Errors at the presentation boundary (filter input coming from a request or CLI).
#[derive(thiserror::Error, Debug)]
pub enum ViewError {
    /// Filter input failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export error
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),
}

impl ViewError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Convert to a user-friendly error message.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for source tiers.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type alias for view operations.
pub type ViewResult<T> = Result<T, ViewError>;
