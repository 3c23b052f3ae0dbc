//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading the merged ratings dataset.
///
/// Every variant is fatal: the dashboard computes everything eagerly at
/// startup, so nothing downstream can render without a fully loaded table.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the file (bad quoting, ragged rows,
    /// undecodable fields)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row is missing a required column
    #[error("Missing required column '{column}' in header")]
    MissingColumn { column: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field} at row {row}: {value}")]
    InvalidValue {
        field: String,
        row: usize,
        value: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
