//! Combined CSV writer.
//!
//! Output files start with a UTF-8 byte order mark so spreadsheet tools
//! detect the encoding, followed by a header row in [`OutputColumn::ALL`]
//! order. Missing seat fields are written as empty strings.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::{Terminator, WriterBuilder};
use tdgen_model::{OutputColumn, OutputRecord};
use tracing::info;

use crate::error::{Result, WriteError};

/// File name prefix used when none is configured.
pub const DEFAULT_OUTPUT_PREFIX: &str = "generated_combined_data";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// `{prefix}_{YYYYmmdd_HHMMSS}.csv`
pub fn output_file_name(prefix: &str, timestamp: &NaiveDateTime) -> String {
    format!("{prefix}_{}.csv", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes the BOM, header and records to `writer`.
pub fn write_records_to<W: Write>(mut writer: W, records: &[OutputRecord]) -> io::Result<()> {
    writer.write_all(UTF8_BOM)?;
    let mut csv = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    csv.write_record(OutputColumn::header())?;
    for record in records {
        csv.write_record(record.to_fields())?;
    }
    csv.flush()
}

/// Writes records to a new file at `path`, replacing any existing file.
pub fn write_records(path: &Path, records: &[OutputRecord]) -> Result<()> {
    let file = File::create(path).map_err(|source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_records_to(BufWriter::new(file), records).map_err(|source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes records to a timestamped file in `dir`, creating `dir` if needed.
///
/// Returns the path written.
pub fn write_timestamped(
    dir: &Path,
    prefix: &str,
    records: &[OutputRecord],
    timestamp: &NaiveDateTime,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(output_file_name(prefix, timestamp));
    write_records(&path, records)?;
    info!(
        path = %path.display(),
        records = records.len(),
        "output written"
    );
    Ok(path)
}
