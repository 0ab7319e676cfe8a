//! Master reference tables loaded from the master data directory.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// One row of a master table, keyed by column name.
pub type MasterRow = BTreeMap<String, String>;

/// A named, ordered collection of rows read from one CSV file.
///
/// Columns keep their header order. Tables are read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<MasterRow>,
}

impl MasterTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<MasterRow>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Builds a table from string literals. Mostly useful in tests.
    pub fn from_rows(name: &str, columns: &[&str], rows: &[&[&str]]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
        let rows = rows
            .iter()
            .map(|values| {
                columns
                    .iter()
                    .cloned()
                    .zip(values.iter().map(|v| (*v).to_string()))
                    .collect()
            })
            .collect();
        Self::new(name, columns, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MasterRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first declared column, if the table has a header.
    pub fn first_column(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fails with [`ConfigurationError::MissingColumn`] unless the column exists.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(ConfigurationError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
        }
    }

    /// Fails with [`ConfigurationError::EmptyTable`] when the table has no rows.
    pub fn require_rows(&self) -> Result<()> {
        if self.is_empty() {
            Err(ConfigurationError::EmptyTable {
                table: self.name.clone(),
            })
        } else {
            Ok(())
        }
    }

    /// Value of `column` in `row`, empty when the cell is absent.
    pub fn value<'a>(&'a self, row: usize, column: &str) -> &'a str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", String::as_str)
    }

    /// Values of a column in row order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(column).map_or("", String::as_str))
    }

    /// Distinct non-empty values of a column, in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.column_values(column)
            .filter(|value| !value.is_empty())
            .filter(|value| seen.insert(*value))
            .map(str::to_string)
            .collect()
    }
}

/// All master tables of a run, keyed by table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterData {
    tables: BTreeMap<String, MasterTable>,
}

impl MasterData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table, returning the previous table with the same name.
    pub fn insert(&mut self, table: MasterTable) -> Option<MasterTable> {
        self.tables.insert(table.name().to_string(), table)
    }

    pub fn get(&self, name: &str) -> Option<&MasterTable> {
        self.tables.get(name)
    }

    /// Looks up a table that generation cannot proceed without.
    pub fn require(&self, name: &str) -> Result<&MasterTable> {
        self.get(name).ok_or_else(|| ConfigurationError::MissingTable {
            table: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn tables(&self) -> impl Iterator<Item = &MasterTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<MasterTable> for MasterData {
    fn from_iter<I: IntoIterator<Item = MasterTable>>(iter: I) -> Self {
        let mut data = Self::new();
        for table in iter {
            data.insert(table);
        }
        data
    }
}
