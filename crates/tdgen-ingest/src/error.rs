//! Error types for master data loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading master tables.
#[derive(Debug, Error)]
pub enum LoadError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Encoding Errors ===
    /// File starts with a byte order mark for an unsupported encoding.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// File content is not valid UTF-8.
    #[error("invalid UTF-8 in {path} at byte {offset}")]
    InvalidEncoding { path: PathBuf, offset: usize },

    // === CSV Parsing Errors ===
    /// Failed to parse delimited text.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A header cell is blank.
    #[error("empty column name at position {position} in {path}")]
    EmptyHeader { path: PathBuf, position: usize },

    /// The same column name appears twice in the header.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateHeader { path: PathBuf, column: String },

    // === Directory Content Errors ===
    /// Two files map to the same table name.
    #[error("table '{table}' defined by both {first} and {second}")]
    DuplicateTable {
        table: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
