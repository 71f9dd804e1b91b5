//! Header resolution: mapping a price list's column names to semantic roles

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// The semantic purpose of a column in a price list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Product name
    Name,
    /// Retail price
    Price,
    /// Packaging size, mass or weight
    Weight,
}

impl ColumnRole {
    /// Header names accepted for this role, already normalized
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            ColumnRole::Name => &["название", "продукт", "товар", "наименование"],
            ColumnRole::Price => &["цена", "розница"],
            ColumnRole::Weight => &["фасовка", "масса", "вес"],
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Name => write!(f, "name"),
            ColumnRole::Price => write!(f, "price"),
            ColumnRole::Weight => write!(f, "weight"),
        }
    }
}

/// Column indices for every role in one file's header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub price: usize,
    pub weight: usize,
}

impl ColumnMap {
    /// Index of the column holding `role`
    pub fn index_of(&self, role: ColumnRole) -> usize {
        match role {
            ColumnRole::Name => self.name,
            ColumnRole::Price => self.price,
            ColumnRole::Weight => self.weight,
        }
    }
}

/// Trim and lowercase a header so that " Цена " matches "цена"
pub fn normalize_header(header: &str) -> String {
    // Spreadsheet exports may leave a BOM on the first header
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Find the first header (in column order) whose normalized text is one of `candidates`
pub fn resolve_column<S: AsRef<str>>(headers: &[S], candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| candidates.contains(&normalize_header(h.as_ref()).as_str()))
}

/// Resolve all three roles for a file, failing on the first role with no match
pub fn resolve_columns<S: AsRef<str>>(headers: &[S], path: &Path) -> Result<ColumnMap> {
    let find = |role: ColumnRole| {
        resolve_column(headers, role.candidates()).ok_or_else(|| Error::ColumnNotFound {
            path: path.to_path_buf(),
            role,
        })
    };

    Ok(ColumnMap {
        name: find(ColumnRole::Name)?,
        price: find(ColumnRole::Price)?,
        weight: find(ColumnRole::Weight)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ignores_case_and_whitespace() {
        let headers = ["  Наименование ", "ЦЕНА", "Вес"];
        let idx = resolve_column(&headers, ColumnRole::Name.candidates());
        assert_eq!(idx, Some(0));
        assert_eq!(resolve_column(&headers, ColumnRole::Price.candidates()), Some(1));
        assert_eq!(resolve_column(&headers, ColumnRole::Weight.candidates()), Some(2));
    }

    #[test]
    fn test_normalize_header_strips_bom() {
        assert_eq!(normalize_header("\u{feff}Название"), "название");
        assert_eq!(normalize_header("\u{feff} название "), "название");
        assert_eq!(normalize_header(" Розница\t"), "розница");
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let headers = ["id", "товар", "название"];
        assert_eq!(resolve_column(&headers, ColumnRole::Name.candidates()), Some(1));
    }

    #[test]
    fn test_resolve_requires_exact_match() {
        let headers = ["цена за кг", "ценаа"];
        assert_eq!(resolve_column(&headers, ColumnRole::Price.candidates()), None);
    }

    #[test]
    fn test_resolve_columns_arbitrary_order() {
        let headers = ["масса", "розница", "продукт", "склад"];
        let map = resolve_columns(&headers, Path::new("price.csv")).unwrap();
        assert_eq!(
            map,
            ColumnMap {
                name: 2,
                price: 1,
                weight: 0
            }
        );
        assert_eq!(map.index_of(ColumnRole::Price), 1);
    }

    #[test]
    fn test_resolve_columns_reports_missing_role() {
        let headers = ["название", "вес"];
        let err = resolve_columns(&headers, Path::new("price_bad.csv")).unwrap_err();
        match err {
            Error::ColumnNotFound { role, path } => {
                assert_eq!(role, ColumnRole::Price);
                assert_eq!(path, Path::new("price_bad.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
