//! Loading a directory of price lists into a catalog
//!
//! Each file is parsed on its own; a file that cannot be read or whose header
//! lacks a required column is reported and skipped without affecting the rest.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parser::{parse_price_file, FileSummary};
use crate::scanner::discover_price_files;
use std::path::{Path, PathBuf};

/// A price list that was left out of the catalog
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of loading one directory
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Files that contributed records, in load order
    pub loaded: Vec<FileSummary>,
    /// Files that were skipped entirely, with the reason
    pub skipped: Vec<SkippedFile>,
}

impl IngestReport {
    /// Total records added to the catalog
    pub fn records_loaded(&self) -> usize {
        self.loaded.iter().map(|f| f.accepted).sum()
    }

    /// Total malformed rows dropped across loaded files
    pub fn rows_skipped(&self) -> usize {
        self.loaded.iter().map(|f| f.skipped_rows).sum()
    }

    /// Number of price lists found in the directory
    pub fn files_found(&self) -> usize {
        self.loaded.len() + self.skipped.len()
    }
}

/// Load every price list in `dir` into `catalog`
///
/// File-level failures (see [`Error::is_file_level`]) end up in
/// [`IngestReport::skipped`]; anything else, such as failing to list `dir`
/// itself, is returned as an error.
pub fn load_directory<P: AsRef<Path>>(catalog: &mut Catalog, dir: P) -> Result<IngestReport> {
    let dir = dir.as_ref();
    let mut report = IngestReport::default();

    for path in discover_price_files(dir)? {
        match parse_price_file(&path) {
            Ok(load) => {
                tracing::debug!(
                    file = %path.display(),
                    accepted = load.summary.accepted,
                    skipped_rows = load.summary.skipped_rows,
                    "loaded price list"
                );
                catalog.append(load.records);
                report.loaded.push(load.summary);
            }
            Err(error) if error.is_file_level() => {
                tracing::warn!(file = %path.display(), %error, "skipping price list");
                report.skipped.push(SkippedFile { path, error });
            }
            Err(error) => return Err(error),
        }
    }

    tracing::info!(
        dir = %dir.display(),
        files = report.loaded.len(),
        skipped_files = report.skipped.len(),
        records = report.records_loaded(),
        "price lists loaded"
    );

    Ok(report)
}
