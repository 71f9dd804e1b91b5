//! Directory scanner for discovering price list files

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Substring a file name must contain (case-insensitively) to be loaded
pub const PRICE_FILE_MARKER: &str = "price";

/// List the price lists directly inside `dir`, sorted by file name
///
/// Subdirectories are not descended into. Sorting makes the load order, and so
/// the catalog order, independent of the platform's listing order.
pub fn discover_price_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // A broken link or unreadable entry only costs that entry
            Err(e) if e.depth() > 0 => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
            Err(e) => {
                return Err(Error::DirectoryRead {
                    path: dir.to_path_buf(),
                    source: e,
                })
            }
        };

        if entry.file_type().is_file() && is_price_file(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Check whether a file name marks a price list
pub fn is_price_file(file_name: &str) -> bool {
    file_name.to_lowercase().contains(PRICE_FILE_MARKER)
}
