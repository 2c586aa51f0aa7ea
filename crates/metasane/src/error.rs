//! Error types for the metasane library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for metasane operations.
#[derive(Debug, Error)]
pub enum MetasaneError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A field name appears more than once in the header.
    #[error("Duplicate field name '{0}'")]
    DuplicateField(String),

    /// A record does not line up with the declared field names.
    #[error("Malformed record at row {row}: {message}")]
    MalformedRecord { row: usize, message: String },

    /// A controlled field references more than one known vocabulary.
    ///
    /// A column is expected to draw every value from a single vocabulary;
    /// seeing several is a configuration problem in the source data, not a
    /// per-cell finding, so validation stops here.
    #[error("Field '{field}' references {count} distinct vocabularies, expected exactly one")]
    MultipleVocabularies { field: String, count: usize },
}

/// Result type alias for metasane operations.
pub type Result<T> = std::result::Result<T, MetasaneError>;
