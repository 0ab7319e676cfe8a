//! Stable per-customer flag and grade assignment.

use std::collections::HashMap;

use rand::Rng;
use tdgen_model::{
    ConfigurationError, CustomerAssignment, GenerationOptions, MasterData, MasterTable, Result,
};

/// Assigns each customer a (flag, grade) pair on first encounter and
/// returns the same pair for every later lookup within the run.
#[derive(Debug, Clone)]
pub struct CustomerAssigner {
    flags: Vec<String>,
    grades: Vec<String>,
    assignments: HashMap<String, CustomerAssignment>,
}

impl CustomerAssigner {
    /// Creates an assigner over explicit flag and grade value sets, neither
    /// of which may be empty.
    pub fn new(flags: Vec<String>, grades: Vec<String>) -> Result<Self> {
        if flags.is_empty() {
            return Err(ConfigurationError::EmptyValueSet("flag"));
        }
        if grades.is_empty() {
            return Err(ConfigurationError::EmptyValueSet("grade"));
        }
        Ok(Self {
            flags,
            grades,
            assignments: HashMap::new(),
        })
    }

    /// Collects distinct flags from the flags table and distinct grades
    /// from the seats table.
    pub fn from_master(master: &MasterData, options: &GenerationOptions) -> Result<Self> {
        let flags = required_values(
            master.require(&options.tables.flags)?,
            &options.flag_column,
        )?;
        let grades = required_values(
            master.require(&options.tables.seats)?,
            &options.grade_column,
        )?;
        Self::new(flags, grades)
    }

    /// Returns the customer's pair, drawing it uniformly on first use.
    pub fn assign<R: Rng + ?Sized>(&mut self, customer_id: &str, rng: &mut R) -> &CustomerAssignment {
        self.assignments
            .entry(customer_id.to_string())
            .or_insert_with(|| CustomerAssignment {
                flag: pick(&self.flags, rng).to_string(),
                grade: pick(&self.grades, rng).to_string(),
            })
    }

    pub fn get(&self, customer_id: &str) -> Option<&CustomerAssignment> {
        self.assignments.get(customer_id)
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn grades(&self) -> &[String] {
        &self.grades
    }

    /// Number of customers assigned so far.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

fn required_values(table: &MasterTable, column: &str) -> Result<Vec<String>> {
    table.require_column(column)?;
    table.require_rows()?;
    let values = table.distinct_values(column);
    if values.is_empty() {
        return Err(ConfigurationError::NoValues {
            table: table.name().to_string(),
            column: column.to_string(),
        });
    }
    Ok(values)
}

pub(crate) fn pick<'a, R: Rng + ?Sized>(values: &'a [String], rng: &mut R) -> &'a str {
    &values[rng.gen_range(0..values.len())]
}
