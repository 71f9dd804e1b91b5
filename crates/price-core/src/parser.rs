//! CSV parser for price list files

use crate::columns::resolve_columns;
use crate::error::{Error, Result};
use crate::record::{parse_row, PriceRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Records read from one price list, plus how many rows were dropped
#[derive(Debug, Clone)]
pub struct FileLoad {
    /// Accepted records in row order
    pub records: Vec<PriceRecord>,
    /// Per-file counts for reporting
    pub summary: FileSummary,
}

/// Row counts for one successfully loaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Path of the loaded file
    pub path: PathBuf,
    /// Rows that became records
    pub accepted: usize,
    /// Data rows that were malformed and dropped
    pub skipped_rows: usize,
}

/// Parse a price list file
///
/// Either the whole file is accepted (minus malformed rows) or an error is
/// returned and nothing from it is kept.
pub fn parse_price_file<P: AsRef<Path>>(path: P) -> Result<FileLoad> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileAccess {
        path: path.to_path_buf(),
        source: e,
    })?;

    read_price_list(BufReader::new(file), path)
}

/// Parse price list content from a string (useful for testing)
pub fn parse_price_str(content: &str, source_name: &str) -> Result<FileLoad> {
    read_price_list(content.as_bytes(), Path::new(source_name))
}

fn read_price_list<R: Read>(reader: R, path: &Path) -> Result<FileLoad> {
    let csv_err = |e: csv::Error| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Rows may be shorter or longer than the header
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_err)?.clone();
    let columns = resolve_columns(&headers.iter().collect::<Vec<_>>(), path)?;

    let source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut records = Vec::new();
    let mut skipped_rows = 0;
    for result in csv_reader.records() {
        let row = result.map_err(csv_err)?;
        let fields: Vec<&str> = row.iter().collect();

        match parse_row(&fields, &columns, &source_file) {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped_rows += 1;
                tracing::debug!(
                    file = %source_file,
                    line = row.position().map_or(0, |p| p.line()),
                    %reason,
                    "skipping row"
                );
            }
        }
    }

    Ok(FileLoad {
        summary: FileSummary {
            path: path.to_path_buf(),
            accepted: records.len(),
            skipped_rows,
        },
        records,
    })
}
