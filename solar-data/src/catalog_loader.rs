use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use solar_core::{Panel, PriceTier};
use thiserror::Error;

/// Errors that can occur when loading a panel price catalog.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("panel '{panel}' is listed with {first} W and {second} W")]
    InconsistentCapacity {
        panel: String,
        first: Decimal,
        second: Decimal,
    },

    #[error("negative potency {potency} for panel '{panel}' on row {row}")]
    NegativePotency {
        panel: String,
        potency: Decimal,
        row: usize,
    },
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the panel price CSV file.
///
/// One row per price tier:
/// - `panel`: Panel name, shared by all of that panel's tiers
/// - `capacity_w`: Rated output of one module, in watts
/// - `potency`: Largest system (kWp) the tier's inverter kit covers
/// - `inversor`: Inverter label shown on the estimate
/// - `price`: Price of the tier
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PriceTierRecord {
    pub panel: String,
    pub capacity_w: Decimal,
    pub potency: Decimal,
    pub inversor: String,
    pub price: Decimal,
}

/// Loader for panel price catalogs from CSV files.
pub struct PanelCatalogLoader;

impl PanelCatalogLoader {
    /// Parse price tier records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PriceTierRecord>, CatalogLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PriceTierRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records into panels.
    ///
    /// Panels keep the order in which they first appear and are numbered
    /// from 1 in that order. Each panel's tiers are sorted by potency,
    /// ascending; tiers with equal potency keep their file order.
    pub fn build(records: &[PriceTierRecord]) -> Result<Vec<Panel>, CatalogLoaderError> {
        let mut panels: Vec<Panel> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if record.potency < Decimal::ZERO {
                return Err(CatalogLoaderError::NegativePotency {
                    panel: record.panel.clone(),
                    potency: record.potency,
                    row: index + 1,
                });
            }

            let tier = PriceTier {
                potency_kwp: record.potency,
                inversor: record.inversor.clone(),
                price: record.price,
            };

            match panels.iter_mut().find(|p| p.name == record.panel) {
                Some(panel) => {
                    if panel.capacity_w != record.capacity_w {
                        return Err(CatalogLoaderError::InconsistentCapacity {
                            panel: record.panel.clone(),
                            first: panel.capacity_w,
                            second: record.capacity_w,
                        });
                    }
                    panel.prices.push(tier);
                }
                None => panels.push(Panel {
                    id: panels.len() as i64 + 1,
                    name: record.panel.clone(),
                    capacity_w: record.capacity_w,
                    prices: vec![tier],
                }),
            }
        }

        for panel in &mut panels {
            panel.prices.sort_by_key(|tier| tier.potency_kwp);
        }

        Ok(panels)
    }

    /// Parse and group in one step.
    pub fn load<R: Read>(reader: R) -> Result<Vec<Panel>, CatalogLoaderError> {
        Self::build(&Self::parse(reader)?)
    }
}
