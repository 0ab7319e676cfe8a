//! Master data file discovery.
//!
//! Every `.csv` file directly inside the master directory defines one table,
//! named after its file stem. Hidden files (`.seats.csv`, editor swap and
//! lock files) and spreadsheet lock files (`~$seats.csv`) are not tables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LoadError, Result};

/// A CSV file of the master directory and the table it defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterFile {
    pub name: String,
    pub path: PathBuf,
}

/// Finds the master table files in `dir`, sorted by table name.
///
/// Two files with the same table name (`flags.csv` and `flags.CSV`) are a
/// [`LoadError::DuplicateTable`].
pub fn discover_master_files(dir: &Path) -> Result<Vec<MasterFile>> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_error = |source| LoadError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut by_name: BTreeMap<String, PathBuf> = BTreeMap::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() || !is_csv(&path) {
            continue;
        }
        if is_ignored(&path) {
            debug!(path = %path.display(), "skipping non-table file");
            continue;
        }
        let Some(name) = table_name(&path) else {
            debug!(path = %path.display(), "skipping file without a table name");
            continue;
        };
        if let Some(first) = by_name.get(&name) {
            // read_dir order is unspecified; report the pair sorted by path
            let (first, second) = if *first <= path {
                (first.clone(), path)
            } else {
                (path, first.clone())
            };
            return Err(LoadError::DuplicateTable {
                table: name,
                first,
                second,
            });
        }
        by_name.insert(name, path);
    }

    Ok(by_name
        .into_iter()
        .map(|(name, path)| MasterFile { name, path })
        .collect())
}

/// Table name for a master data file: its trimmed file stem, if any.
pub fn table_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?.trim();
    (!stem.is_empty()).then(|| stem.to_string())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_none_or(|name| name.starts_with('.') || name.starts_with("~$"))
}
