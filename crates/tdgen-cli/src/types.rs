use std::path::PathBuf;

/// Result of one `tdgen` run, rendered by the summary table.
#[derive(Debug)]
pub struct GenerateResult {
    pub master_dir: PathBuf,
    pub tables: Vec<TableSummary>,
    pub seed: u64,
    /// Whether the seed came from `--seed` rather than entropy.
    pub seed_fixed: bool,
    pub requested: usize,
    pub generated: usize,
    pub duplicates_removed: usize,
    pub written: usize,
    pub universe_size: usize,
    pub seat_resets: usize,
    pub customers_assigned: usize,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    /// Whether generation reads this table.
    pub used: bool,
}
