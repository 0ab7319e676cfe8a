//! Deduplication and ordering of generated records.

use std::cmp::Ordering;
use std::collections::HashSet;

use tdgen_model::{OutputColumn, OutputRecord};

/// Records after deduplication and sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProcessed {
    pub records: Vec<OutputRecord>,
    pub duplicates_removed: usize,
}

/// Removes duplicates by `key_columns`, then sorts by customer identifier.
pub fn dedupe_and_sort(records: Vec<OutputRecord>, key_columns: &[OutputColumn]) -> PostProcessed {
    let before = records.len();
    let mut records = dedupe(records, key_columns);
    let duplicates_removed = before - records.len();
    sort_by_customer(&mut records);
    PostProcessed {
        records,
        duplicates_removed,
    }
}

/// Keeps the first record of every group sharing the same values across
/// `key_columns`. An empty key list compares every output column.
pub fn dedupe(mut records: Vec<OutputRecord>, key_columns: &[OutputColumn]) -> Vec<OutputRecord> {
    let keys: &[OutputColumn] = if key_columns.is_empty() {
        &OutputColumn::ALL
    } else {
        key_columns
    };
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(records.len());
    records.retain(|record| {
        let composite = keys
            .iter()
            .map(|column| record.value(*column).to_string())
            .collect();
        seen.insert(composite)
    });
    records
}

/// Stable sort by customer identifier, see [`compare_customer_ids`].
pub fn sort_by_customer(records: &mut [OutputRecord]) {
    records.sort_by(|a, b| compare_customer_ids(&a.customer_no, &b.customer_no));
}

/// Orders customer identifiers.
///
/// Identifiers made only of ASCII digits compare by numeric value (any
/// length, leading zeros ignored) and sort before all other identifiers,
/// which compare lexically. Numeric ties fall back to lexical order.
pub fn compare_customer_ids(a: &str, b: &str) -> Ordering {
    match (numeric_digits(a), numeric_digits(b)) {
        (Some(left), Some(right)) => left
            .len()
            .cmp(&right.len())
            .then_with(|| left.cmp(right))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Significant digits of a fully numeric identifier.
fn numeric_digits(id: &str) -> Option<&str> {
    let id = id.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(id.trim_start_matches('0'))
}
