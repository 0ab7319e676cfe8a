//! CSV parsing of a single master table.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tdgen_model::{MasterRow, MasterTable};

use crate::discovery::MasterFile;
use crate::error::{LoadError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reads a discovered master file as a table with a header row.
///
/// Header names and values are trimmed; a leading UTF-8 byte order mark is
/// ignored.
pub fn read_master_table(file: &MasterFile) -> Result<MasterTable> {
    let path = file.path.as_path();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_master_table(&file.name, path, &bytes)
}

/// Parses CSV bytes into a master table. `path` is only used for errors.
pub fn parse_master_table(name: &str, path: &Path, bytes: &[u8]) -> Result<MasterTable> {
    let content = decode_utf8(path, bytes)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let csv_error = |source: csv::Error| LoadError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(LoadError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    for (position, header) in headers.iter().enumerate() {
        let column = header.trim_matches('\u{feff}').trim().to_string();
        if column.is_empty() {
            return Err(LoadError::EmptyHeader {
                path: path.to_path_buf(),
                position,
            });
        }
        if columns.contains(&column) {
            return Err(LoadError::DuplicateHeader {
                path: path.to_path_buf(),
                column,
            });
        }
        columns.push(column);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let row: MasterRow = columns
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    Ok(MasterTable::new(name, columns, rows))
}

/// Rejects UTF-16 byte order marks and invalid UTF-8, stripping a UTF-8 BOM.
fn decode_utf8<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a str> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(LoadError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(LoadError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(body).map_err(|e| LoadError::InvalidEncoding {
        path: path.to_path_buf(),
        offset: e.valid_up_to() + (bytes.len() - body.len()),
    })
}
