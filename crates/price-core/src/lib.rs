//! price-core: Core library for aggregating product price lists
//!
//! This library provides functionality to:
//! - Scan a directory for price list files (CSV with "price" in the name)
//! - Resolve each file's columns to name, price and weight by header synonyms
//! - Parse and validate rows into records with a per-unit price
//! - Search the loaded catalog by name fragment, cheapest per unit first
//! - Export the whole catalog as an HTML table

pub mod catalog;
pub mod columns;
pub mod error;
pub mod export;
pub mod ingest;
pub mod parser;
pub mod record;
pub mod scanner;
pub mod search;

pub use catalog::Catalog;
pub use columns::{resolve_column, resolve_columns, ColumnMap, ColumnRole};
pub use error::{Error, Result};
pub use export::{export_html, render_html, DEFAULT_OUTPUT};
pub use ingest::{load_directory, IngestReport, SkippedFile};
pub use parser::{parse_price_file, parse_price_str, FileLoad, FileSummary};
pub use record::{parse_row, PriceRecord, RowError};
pub use scanner::discover_price_files;
pub use search::{print_search, render_report, search};
