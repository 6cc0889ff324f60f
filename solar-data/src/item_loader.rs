use std::collections::HashMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use solar_core::numeric::lenient_decimal;
use solar_core::{ItemKind, LineItem};
use thiserror::Error;

use crate::fields::lenient_flag;

#[derive(Debug, Error)]
pub enum ItemLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("unrecognised item kind '{kind}' on row {row}")]
    UnknownKind { kind: String, row: usize },
}

/// A single line item row.
///
/// Columns: `estimate,name,amount,price,percent,percentage,order,kind`.
/// `kind` is `inversor` for the catalog-driven inverter line and blank or
/// `standard` otherwise. A blank `order` takes the row's position within
/// its estimate.
#[derive(Debug, Deserialize)]
struct ItemRow {
    estimate: String,
    name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    price: Decimal,
    #[serde(default, deserialize_with = "lenient_flag")]
    percent: bool,
    #[serde(default, deserialize_with = "lenient_decimal")]
    percentage: Decimal,
    #[serde(default)]
    order: Option<i32>,
    #[serde(default)]
    kind: String,
}

pub struct ItemLoader;

impl ItemLoader {
    /// Parse line items grouped by estimate name.
    ///
    /// Within an estimate, items keep the order of the file, since percent
    /// lines depend on the lines above them.
    pub fn parse<R: Read>(reader: R) -> Result<HashMap<String, Vec<LineItem>>, ItemLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut items: HashMap<String, Vec<LineItem>> = HashMap::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: ItemRow = result?;
            let kind = ItemKind::parse(&row.kind).ok_or_else(|| ItemLoaderError::UnknownKind {
                kind: row.kind.clone(),
                row: index + 1,
            })?;

            let lines = items.entry(row.estimate).or_default();
            let order = row.order.unwrap_or(lines.len() as i32 + 1);
            lines.push(LineItem {
                name: row.name,
                amount: row.amount,
                price: row.price,
                percent: row.percent,
                percentage: row.percentage,
                order,
                kind,
            });
        }

        Ok(items)
    }
}
