//! In-memory store of every record loaded from the scanned price lists

use crate::record::PriceRecord;

/// Ordered, append-only collection of price records
///
/// Records keep the order they were loaded in: files in discovery order, then
/// rows in file order. Only ingestion appends; everything else reads.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<PriceRecord>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }

    /// Append one file's records after those already loaded
    pub(crate) fn append(&mut self, records: Vec<PriceRecord>) {
        self.records.extend(records);
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
