//! Error handling for the classifier.

pub mod util;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use std::io;
use std::path::PathBuf;

/// Specialized error type for loading and querying diagnosis data
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Error opening or reading a file
    #[error("IO error: {message}{}", path_suffix(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error reading an Excel workbook
    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// None of the candidate code columns exist in a source
    #[error("No {} column found in {source_name}", .candidates.join(" or "))]
    MissingCodeColumn {
        source_name: String,
        candidates: Vec<String>,
    },

    /// The file extension is not a supported input format
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A query could not be built from its inputs
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl ClassifierError {
    /// Create an IO error without an underlying source
    #[must_use]
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error wrapping the `io::Error` that caused it
    #[must_use]
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach the path an IO error relates to
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message,
                path: Some(path.into()),
                source,
            },
            other => other,
        }
    }

    /// Prefix an IO error message with more context
    #[must_use]
    pub fn context(self, context: impl AsRef<str>) -> Self {
        match self {
            Self::Io {
                message,
                path,
                source,
            } => Self::Io {
                message: format!("{}: {message}", context.as_ref()),
                path,
                source,
            },
            other => other,
        }
    }
}

/// Result type for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;
