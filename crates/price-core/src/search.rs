//! Text search over the catalog and the columnar report it prints

use crate::catalog::Catalog;
use crate::record::PriceRecord;
use std::io::{self, Write};

const INDEX_LABEL: &str = "No.";
const NAME_LABEL: &str = "Name";
const PRICE_LABEL: &str = "Price";
const WEIGHT_LABEL: &str = "Weight";
const FILE_LABEL: &str = "File";
const PER_UNIT_LABEL: &str = "Price/unit";

/// Find records whose name contains `query`, cheapest per unit first
///
/// Matching ignores case. Records with equal per-unit price keep catalog order.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a PriceRecord> {
    let needle = query.to_lowercase();
    let mut matches: Vec<&PriceRecord> = catalog
        .iter()
        .filter(|r| r.name().to_lowercase().contains(&needle))
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| a.price_per_unit().total_cmp(&b.price_per_unit()));
    matches
}

/// Render matches as an aligned text table
///
/// Name, price, weight and file columns are as wide as their longest value in `matches`.
pub fn render_report(matches: &[&PriceRecord]) -> String {
    let prices: Vec<String> = matches.iter().map(|r| r.price().to_string()).collect();
    let weights: Vec<String> = matches.iter().map(|r| r.weight().to_string()).collect();

    let name_width = column_width(matches.iter().map(|r| r.name()), NAME_LABEL);
    let price_width = column_width(prices.iter().map(String::as_str), PRICE_LABEL);
    let weight_width = column_width(weights.iter().map(String::as_str), WEIGHT_LABEL);
    let file_width = column_width(matches.iter().map(|r| r.source_file()), FILE_LABEL);

    let mut out = format!(
        "{:<5} {:<name_width$}  {:<price_width$}  {:<weight_width$}  {:<file_width$}  {}\n",
        INDEX_LABEL, NAME_LABEL, PRICE_LABEL, WEIGHT_LABEL, FILE_LABEL, PER_UNIT_LABEL
    );

    for (idx, record) in matches.iter().enumerate() {
        out.push_str(&format!(
            "{:<5} {:<name_width$}  {:<price_width$}  {:<weight_width$}  {:<file_width$}  {:.2}\n",
            idx + 1,
            record.name(),
            prices[idx],
            weights[idx],
            record.source_file(),
            record.price_per_unit()
        ));
    }

    out
}

/// Search, write the report to `out`, and hand back the matches
pub fn print_search<'a, W: Write>(
    catalog: &'a Catalog,
    query: &str,
    out: &mut W,
) -> io::Result<Vec<&'a PriceRecord>> {
    let matches = search(catalog, query);
    writeln!(out)?;
    writeln!(out, "Search results for '{}':", query)?;
    out.write_all(render_report(&matches).as_bytes())?;
    out.flush()?;
    Ok(matches)
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, label: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(label.chars().count()))
        .max()
        .unwrap_or(0)
}
