//! Configuration errors raised before generation can start.

use thiserror::Error;

/// A required master table, column or value set is missing, or the
/// generation options cannot be satisfied by the loaded master data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A required master table was not found in the master data directory.
    #[error("required master table '{table}' not found")]
    MissingTable { table: String },

    /// A required column is absent from a master table.
    #[error("required column '{column}' not found in master table '{table}'")]
    MissingColumn { table: String, column: String },

    /// A required master table has no data rows.
    #[error("master table '{table}' has no rows")]
    EmptyTable { table: String },

    /// A column has no non-empty values to sample from.
    #[error("column '{column}' in master table '{table}' has no values to sample")]
    NoValues { table: String, column: String },

    /// An explicitly supplied value set is empty.
    #[error("no {0} values to sample")]
    EmptyValueSet(&'static str),

    /// The seat combination universe is empty.
    #[error("seat combination universe is empty")]
    EmptyUniverse,

    /// The cross product of seat column values exceeds the allowed size.
    #[error("seat cross product has {size} combinations (limit {limit})")]
    UniverseTooLarge { size: u128, limit: u128 },

    /// A deduplication key does not name an output column.
    #[error("unknown output column '{0}'")]
    UnknownColumn(String),

    /// An option value is not usable.
    #[error("invalid option {option}: {reason}")]
    InvalidOption { option: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
