//! Configuration options for dataset generation.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::record::OutputColumn;
use crate::seat::{GRADE_COLUMN, SEAT_COLUMNS};

/// How the seat combination universe is built from the seats table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UniverseMode {
    /// Distinct combinations that occur in the seats table.
    #[default]
    Observed,
    /// Cross product of each seat column's distinct values.
    CrossProduct,
}

/// Names of the master tables generation reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    pub customers: String,
    pub flags: String,
    pub seats: String,
    pub prices: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            customers: "customers".to_string(),
            flags: "flags".to_string(),
            seats: "seats".to_string(),
            prices: "prices".to_string(),
        }
    }
}

/// Options controlling one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Number of rows to synthesize before deduplication.
    pub num_records: usize,

    /// Master table names.
    pub tables: TableNames,

    /// Customer identifier column in the customers table.
    pub customer_column: String,

    /// Flag column in the flags table.
    pub flag_column: String,

    /// Grade column in the seats table.
    pub grade_column: String,

    /// Flag value meaning "no seat assigned".
    pub no_seat_flag: String,

    /// Seat columns that make up a seat combination.
    ///
    /// Including the grade column makes the drawn seat's grade override the
    /// customer's assigned grade.
    pub seat_columns: Vec<String>,

    /// How the seat universe is built.
    pub universe: UniverseMode,

    /// Columns compared when removing duplicate records.
    /// Empty means every output column.
    pub dedupe_keys: Vec<OutputColumn>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            num_records: 0,
            tables: TableNames::default(),
            customer_column: "customerNo".to_string(),
            flag_column: "flag".to_string(),
            grade_column: GRADE_COLUMN.to_string(),
            no_seat_flag: "0".to_string(),
            seat_columns: SEAT_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            universe: UniverseMode::default(),
            dedupe_keys: vec![
                OutputColumn::CustomerNo,
                OutputColumn::Grade,
                OutputColumn::PriceType,
            ],
        }
    }
}

impl GenerationOptions {
    pub fn new(num_records: usize) -> Self {
        Self {
            num_records,
            ..Self::default()
        }
    }

    pub fn with_universe(mut self, universe: UniverseMode) -> Self {
        self.universe = universe;
        self
    }

    pub fn with_no_seat_flag(mut self, flag: impl Into<String>) -> Self {
        self.no_seat_flag = flag.into();
        self
    }

    pub fn with_seat_columns(mut self, columns: Vec<String>) -> Self {
        self.seat_columns = columns;
        self
    }

    /// Adds the grade column to the seat combination if it is not already there.
    pub fn with_seat_grade(mut self) -> Self {
        if !self.seat_columns.contains(&self.grade_column) {
            self.seat_columns.push(self.grade_column.clone());
        }
        self
    }

    pub fn with_dedupe_keys(mut self, keys: Vec<OutputColumn>) -> Self {
        self.dedupe_keys = keys;
        self
    }

    pub fn with_customer_column(mut self, column: impl Into<String>) -> Self {
        self.customer_column = column.into();
        self
    }

    pub fn includes_seat_grade(&self) -> bool {
        self.seat_columns.contains(&self.grade_column)
    }

    /// Checks option values that do not depend on the master data.
    pub fn validate(&self) -> Result<()> {
        if self.num_records == 0 {
            return Err(invalid("num_records", "must be a positive integer"));
        }
        for (option, value) in [
            ("customer_column", &self.customer_column),
            ("flag_column", &self.flag_column),
            ("grade_column", &self.grade_column),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(option, "must not be empty"));
            }
        }
        if self.seat_columns.is_empty() {
            return Err(invalid("seat_columns", "at least one seat column is required"));
        }
        for (idx, column) in self.seat_columns.iter().enumerate() {
            if self.seat_columns[..idx].contains(column) {
                return Err(invalid(
                    "seat_columns",
                    &format!("column '{column}' listed more than once"),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(option: &str, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidOption {
        option: option.to_string(),
        reason: reason.to_string(),
    }
}
