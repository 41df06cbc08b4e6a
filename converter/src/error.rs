//! Error types for the conversion pipeline.
//!
//! - [`CsvError`] - reading and parsing one input table
//! - [`ExportError`] - normalizing and writing the JSON document
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading a single CSV table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Required input file does not exist.
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A row's cell count does not match the header (or the key,value shape).
    #[error(
        "Malformed row in {} at line {line}: expected {expected} cells, found {found}",
        path.display()
    )]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The designated id column is absent from the header.
    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A single-row table has a header but no data row.
    #[error("No data rows in {}", path.display())]
    NoDataRows { path: PathBuf },

    /// File bytes could not be decoded to text.
    #[error("Failed to decode {}: {message}", path.display())]
    Encoding { path: PathBuf, message: String },

    /// CSV syntax error.
    #[error("Invalid CSV in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Any other read failure.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while building or writing the output document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A value has no JSON representation.
    #[error("Value '{value}' at {field}.{key} cannot be represented in JSON")]
    Unserializable {
        field: String,
        key: String,
        value: String,
    },

    /// Output path is not writable.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::pipeline::convert`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Output error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A file name override refers to a field that does not exist.
    #[error("Unknown field '{0}'")]
    UnknownField(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
