//! Error handling for diagnosis extraction and episode consolidation.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for the extraction pipeline
#[derive(Debug, thiserror::Error)]
pub enum PatoError {
    /// Sibling list columns of one row have different lengths
    #[error(
        "Data integrity violation in row '{row}': column '{column}' has {actual} entries, \
         driver column '{driver}' has {expected}"
    )]
    Integrity {
        /// Row (patient) identifier
        row: String,
        /// Driver column name
        driver: String,
        /// Offending column name
        column: String,
        /// Length of the driver column
        expected: usize,
        /// Length of the offending column
        actual: usize,
    },

    /// A named column is missing from a row
    #[error("Column '{column}' not found in row '{row}'")]
    ColumnNotFound {
        /// Row (patient) identifier
        row: String,
        /// Missing column name
        column: String,
    },

    /// A date string could not be parsed with any configured format
    #[error("Could not parse date '{value}' in column '{column}'")]
    DateParse {
        /// Raw cell value
        value: String,
        /// Column the value came from
        column: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid extractor pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// File could not be used for the requested purpose
    #[error("{message}: {}", .path.display())]
    File {
        /// Path of the file or directory
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error building or reading Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading or writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error (de)serializing JSON configuration or mapping tables
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl PatoError {
    /// Create a file error for a path
    pub fn file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Column name this error refers to, if any
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Integrity { column, .. }
            | Self::ColumnNotFound { column, .. }
            | Self::DateParse { column, .. } => Some(column),
            _ => None,
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PatoError>;
