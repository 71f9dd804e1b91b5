//! Price records and the per-row parser that produces them

use crate::columns::{ColumnMap, ColumnRole};
use serde::Serialize;
use thiserror::Error;

/// Why a data row was skipped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// The row is shorter than the column a role resolved to
    #[error("row has no {role} field (column {index})")]
    MissingField { role: ColumnRole, index: usize },

    /// A price or weight field is not a finite number
    #[error("{role} '{value}' is not a number")]
    InvalidNumber { role: ColumnRole, value: String },

    /// Blank product name
    #[error("product name is empty")]
    EmptyName,

    /// Price of zero or below
    #[error("price {0} is not positive")]
    NonPositivePrice(f64),

    /// Weight of zero or below; would make the per-unit price meaningless
    #[error("weight {0} is not positive")]
    NonPositiveWeight(f64),

    /// `price / weight` overflows to infinity
    #[error("price per unit of {price} / {weight} is out of range")]
    PricePerUnitOutOfRange { price: f64, weight: f64 },
}

/// One validated product line from a price list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    name: String,
    price: f64,
    weight: f64,
    source_file: String,
    price_per_unit: f64,
}

impl PriceRecord {
    /// Validate the fields and compute the per-unit price
    pub fn new(
        name: impl Into<String>,
        price: f64,
        weight: f64,
        source_file: impl Into<String>,
    ) -> Result<Self, RowError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RowError::EmptyName);
        }
        for (role, value) in [(ColumnRole::Price, price), (ColumnRole::Weight, weight)] {
            if !value.is_finite() {
                return Err(RowError::InvalidNumber {
                    role,
                    value: value.to_string(),
                });
            }
        }
        if price <= 0.0 {
            return Err(RowError::NonPositivePrice(price));
        }
        if weight <= 0.0 {
            return Err(RowError::NonPositiveWeight(weight));
        }

        let price_per_unit = price / weight;
        if !price_per_unit.is_finite() {
            return Err(RowError::PricePerUnitOutOfRange { price, weight });
        }

        Ok(Self {
            name,
            price,
            weight,
            source_file: source_file.into(),
            price_per_unit,
        })
    }

    /// Product name as written in the source file
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// File name the record was read from
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// `price / weight`, fixed at construction
    pub fn price_per_unit(&self) -> f64 {
        self.price_per_unit
    }
}

/// Turn one data row into a record using the file's resolved columns
pub fn parse_row<S: AsRef<str>>(
    row: &[S],
    columns: &ColumnMap,
    source_file: &str,
) -> Result<PriceRecord, RowError> {
    let name = field(row, columns, ColumnRole::Name)?;
    let price = parse_number(field(row, columns, ColumnRole::Price)?, ColumnRole::Price)?;
    let weight = parse_number(field(row, columns, ColumnRole::Weight)?, ColumnRole::Weight)?;

    PriceRecord::new(name, price, weight, source_file)
}

fn field<'a, S: AsRef<str>>(
    row: &'a [S],
    columns: &ColumnMap,
    role: ColumnRole,
) -> Result<&'a str, RowError> {
    let index = columns.index_of(role);
    row.get(index)
        .map(|s| s.as_ref())
        .ok_or(RowError::MissingField { role, index })
}

fn parse_number(raw: &str, role: ColumnRole) -> Result<f64, RowError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RowError::InvalidNumber {
            role,
            value: raw.to_string(),
        }),
    }
}
