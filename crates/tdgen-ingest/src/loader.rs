//! Loading every master table of a directory.

use std::path::{Path, PathBuf};

use tdgen_model::MasterData;
use tracing::{debug, info};

use crate::discovery::discover_master_files;
use crate::error::Result;
use crate::reader::read_master_table;

/// Environment variable overriding the default master data directory.
pub const MASTER_DIR_ENV_VAR: &str = "TDGEN_MASTER_DIR";

/// Directory name used when nothing else is configured.
pub const DEFAULT_MASTER_DIR: &str = "master_data";

/// Get the default master data directory.
///
/// Checks the `TDGEN_MASTER_DIR` environment variable first,
/// then falls back to `master_data` in the working directory.
pub fn default_master_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(MASTER_DIR_ENV_VAR) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    PathBuf::from(DEFAULT_MASTER_DIR)
}

/// Loads every CSV file in `dir` as a master table keyed by file stem.
pub fn load_master_data(dir: &Path) -> Result<MasterData> {
    let mut data = MasterData::new();
    for file in discover_master_files(dir)? {
        let table = read_master_table(&file)?;
        debug!(
            table = %table.name(),
            rows = table.len(),
            columns = %table.columns().join(","),
            path = %file.path.display(),
            "loaded master table"
        );
        data.insert(table);
    }

    info!(
        dir = %dir.display(),
        tables = data.len(),
        "master data loaded"
    );
    Ok(data)
}
