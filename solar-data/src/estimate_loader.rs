//! CSV loader for estimate inputs.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column | Required | Notes |
//! |----------------------|----------|------------------------------------------------|
//! | `estimate` | yes | Name used to match line items and in reports |
//! | `panel` | yes | Must match a panel name in the price catalog |
//! | `roof_orientation` | yes | Free text label |
//! | `orientation_factor` | no | Blank means 1 (ideal orientation) |
//! | `kwh` | no | Unit energy price |
//! | `irradiation` | no | kWh/m² per day |
//! | `month_01`..`month_13` | no | Monthly consumption, oldest first |
//! | `average_increase` | no | Expected kWh increase per month |
//! | `discount_percent` | no | `true` makes `discount` a percentage |
//! | `discount` | no | |
//! | `increase_percent` | no | `true` makes `increase` a percentage |
//! | `increase` | no | |
//!
//! Numeric cells are read leniently: blank or non-numeric values count as
//! zero, and `1.234,56` is accepted alongside `1234.56`.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use solar_core::numeric::{coerce_decimal, lenient_decimal};
use solar_core::{Adjustment, ConsumptionInput, Panel, RawConsumption, RoofOrientation};
use thiserror::Error;

use crate::fields::lenient_flag;

#[derive(Debug, Error)]
pub enum EstimateLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("panel '{panel}' on row {row} is not in the catalog")]
    PanelNotFound { panel: String, row: usize },
}

#[derive(Debug, Deserialize)]
struct EstimateRow {
    estimate: String,
    panel: String,
    roof_orientation: String,
    #[serde(default)]
    orientation_factor: String,
    #[serde(default)]
    kwh: String,
    #[serde(default)]
    irradiation: String,
    #[serde(default)]
    month_01: String,
    #[serde(default)]
    month_02: String,
    #[serde(default)]
    month_03: String,
    #[serde(default)]
    month_04: String,
    #[serde(default)]
    month_05: String,
    #[serde(default)]
    month_06: String,
    #[serde(default)]
    month_07: String,
    #[serde(default)]
    month_08: String,
    #[serde(default)]
    month_09: String,
    #[serde(default)]
    month_10: String,
    #[serde(default)]
    month_11: String,
    #[serde(default)]
    month_12: String,
    #[serde(default)]
    month_13: String,
    #[serde(default)]
    average_increase: String,
    #[serde(default, deserialize_with = "lenient_flag")]
    discount_percent: bool,
    #[serde(default, deserialize_with = "lenient_decimal")]
    discount: Decimal,
    #[serde(default, deserialize_with = "lenient_flag")]
    increase_percent: bool,
    #[serde(default, deserialize_with = "lenient_decimal")]
    increase: Decimal,
}

/// One estimate read from the CSV, ready to calculate.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateInput {
    pub name: String,
    pub consumption: ConsumptionInput,
    pub discount: Adjustment,
    pub increase: Adjustment,
}

fn convert_row(
    row: EstimateRow,
    row_number: usize,
    catalog: &[Panel],
) -> Result<EstimateInput, EstimateLoaderError> {
    let panel = catalog
        .iter()
        .find(|p| p.name == row.panel)
        .cloned()
        .ok_or_else(|| EstimateLoaderError::PanelNotFound {
            panel: row.panel.clone(),
            row: row_number,
        })?;

    let factor = if row.orientation_factor.trim().is_empty() {
        Decimal::ONE
    } else {
        coerce_decimal(&row.orientation_factor)
    };

    let raw = RawConsumption {
        kwh: row.kwh,
        irradiation: row.irradiation,
        months: vec![
            row.month_01,
            row.month_02,
            row.month_03,
            row.month_04,
            row.month_05,
            row.month_06,
            row.month_07,
            row.month_08,
            row.month_09,
            row.month_10,
            row.month_11,
            row.month_12,
            row.month_13,
        ],
        average_increase: row.average_increase,
    };

    Ok(EstimateInput {
        name: row.estimate,
        consumption: raw.into_input(panel, RoofOrientation::new(row.roof_orientation, factor)),
        discount: Adjustment::new(row.discount_percent, row.discount),
        increase: Adjustment::new(row.increase_percent, row.increase),
    })
}

pub struct EstimateLoader;

impl EstimateLoader {
    /// Parse estimates from a CSV reader, resolving panels against `catalog`.
    ///
    /// Row numbers in errors are 1-based, not counting the header.
    pub fn parse<R: Read>(
        reader: R,
        catalog: &[Panel],
    ) -> Result<Vec<EstimateInput>, EstimateLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut estimates = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: EstimateRow = result?;
            estimates.push(convert_row(row, index + 1, catalog)?);
        }

        Ok(estimates)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use solar_core::PriceTier;

    use super::*;

    fn catalog() -> Vec<Panel> {
        vec![Panel {
            id: 1,
            name: "Jinko 410W".to_string(),
            capacity_w: dec!(410),
            prices: vec![PriceTier {
                potency_kwp: dec!(2.5),
                inversor: "Deye 2.5k".to_string(),
                price: dec!(7000),
            }],
        }]
    }

    #[test]
    fn test_parse_minimal_row() {
        let csv = "estimate,panel,roof_orientation\nBakery,Jinko 410W,East";

        let estimates = EstimateLoader::parse(csv.as_bytes(), &catalog()).expect("should parse");

        assert_eq!(estimates.len(), 1);
        let estimate = &estimates[0];
        assert_eq!(estimate.name, "Bakery");
        assert_eq!(estimate.consumption.panel.name, "Jinko 410W");
        assert_eq!(estimate.consumption.roof_orientation.factor, Decimal::ONE);
        assert_eq!(estimate.consumption.months, [Decimal::ZERO; 13]);
        assert_eq!(estimate.discount, Adjustment::Amount(Decimal::ZERO));
        assert_eq!(estimate.increase, Adjustment::Amount(Decimal::ZERO));
    }

    #[test]
    fn test_parse_full_row_with_bad_cells() {
        let csv = "estimate,panel,roof_orientation,orientation_factor,kwh,irradiation,\
                   month_01,month_02,month_03,month_04,month_05,month_06,month_07,\
                   month_08,month_09,month_10,month_11,month_12,month_13,\
                   average_increase,discount_percent,discount,increase_percent,increase\n\
                   Bakery,Jinko 410W,East,0.9,\"0,82\",5.2,\
                   300,320,310,,290,300,abc,310,300,320,330,320,100,\
                   15,true,5,no,\"1.250,00\"";

        let estimates = EstimateLoader::parse(csv.as_bytes(), &catalog()).expect("should parse");
        let estimate = &estimates[0];

        assert_eq!(estimate.consumption.kwh, dec!(0.82));
        assert_eq!(estimate.consumption.irradiation, dec!(5.2));
        assert_eq!(estimate.consumption.roof_orientation.name, "East");
        assert_eq!(estimate.consumption.roof_orientation.factor, dec!(0.9));
        assert_eq!(estimate.consumption.months[0], dec!(300));
        assert_eq!(estimate.consumption.months[3], Decimal::ZERO);
        assert_eq!(estimate.consumption.months[6], Decimal::ZERO);
        assert_eq!(estimate.consumption.months[12], dec!(100));
        assert_eq!(estimate.consumption.average_increase, dec!(15));
        assert_eq!(estimate.discount, Adjustment::Percent(dec!(5)));
        assert_eq!(estimate.increase, Adjustment::Amount(dec!(1250)));
    }

    #[test]
    fn test_parse_unknown_panel() {
        let csv = "estimate,panel,roof_orientation\n\
                   Bakery,Jinko 410W,East\n\
                   Garage,Unknown 300W,West";

        let err = EstimateLoader::parse(csv.as_bytes(), &catalog()).expect_err("should fail");

        match err {
            EstimateLoaderError::PanelNotFound { panel, row } => {
                assert_eq!(panel, "Unknown 300W");
                assert_eq!(row, 2);
            }
            other => panic!("expected PanelNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_required_column() {
        let csv = "estimate,panel\nBakery,Jinko 410W";

        let err = EstimateLoader::parse(csv.as_bytes(), &catalog()).expect_err("should fail");

        assert!(matches!(err, EstimateLoaderError::CsvParse(_)));
    }
}
