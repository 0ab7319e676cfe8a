//! Seat attribute tuples drawn by the seat sampler.

use std::sync::Arc;

/// Seat columns that identify a physical seat.
pub const SEAT_COLUMNS: [&str; 5] = ["floor", "area", "block", "row", "seat"];

/// Column holding the seat grade in the seats table.
pub const GRADE_COLUMN: &str = "grade";

/// One seat assignment: values for each configured seat column.
///
/// Column names are shared between all combinations of one universe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeatCombination {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl SeatCombination {
    /// Pairs `values` with `columns` positionally.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn new(columns: Arc<[String]>, values: Vec<String>) -> Self {
        assert_eq!(
            columns.len(),
            values.len(),
            "seat combination arity must match its columns"
        );
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx].as_str())
    }

    /// The grade component, when grade is part of the combination.
    pub fn grade(&self) -> Option<&str> {
        self.get(GRADE_COLUMN)
    }
}
