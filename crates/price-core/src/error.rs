//! Error types for price-core

use crate::columns::ColumnRole;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in price-core
#[derive(Debug, Error)]
pub enum Error {
    /// A price list has no header matching one of the required roles
    #[error("no {role} column found in '{path}'")]
    ColumnNotFound { path: PathBuf, role: ColumnRole },

    /// Failed to open or read a price list
    #[error("failed to read file '{path}': {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV error from the csv crate (includes invalid UTF-8)
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The scanned directory itself could not be listed
    #[error("failed to read directory '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The export destination could not be written
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error only affects a single file, so ingestion can move on
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            Error::ColumnNotFound { .. } | Error::FileAccess { .. } | Error::Csv { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_file_level() {
        let missing = Error::ColumnNotFound {
            path: PathBuf::from("price.csv"),
            role: ColumnRole::Weight,
        };
        assert!(missing.is_file_level());

        let io = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(Error::FileAccess {
            path: PathBuf::from("price.csv"),
            source: io(),
        }
        .is_file_level());
        assert!(!Error::Write {
            path: PathBuf::from("output.html"),
            source: io(),
        }
        .is_file_level());
        assert!(!Error::Io(io()).is_file_level());
    }
}
