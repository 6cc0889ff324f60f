//! End-to-end tests: catalog, estimates and items loaded from the CSV
//! fixtures, then calculated through the estimate session.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use solar_core::{EstimateCalculator, EstimateError, ItemKind, LineItem, Panel, Payback};
use solar_data::{
    EstimateInput, EstimateLoader, EstimateReport, ItemLoader, PanelCatalogLoader,
    parse_sizing_config,
};

const PANEL_PRICES_CSV: &str = include_str!("../test-data/panel_prices.csv");
const ESTIMATES_CSV: &str = include_str!("../test-data/estimates.csv");
const ITEMS_CSV: &str = include_str!("../test-data/items.csv");
const SIZING_TOML: &str = include_str!("../test-data/sizing.toml");

fn catalog() -> Vec<Panel> {
    PanelCatalogLoader::load(PANEL_PRICES_CSV.as_bytes()).expect("catalog fixture should load")
}

fn estimates() -> Vec<EstimateInput> {
    EstimateLoader::parse(ESTIMATES_CSV.as_bytes(), &catalog())
        .expect("estimates fixture should load")
}

fn items() -> HashMap<String, Vec<LineItem>> {
    ItemLoader::parse(ITEMS_CSV.as_bytes()).expect("items fixture should load")
}

fn report(
    calculator: EstimateCalculator,
    name: &str,
    sync_inversor: bool,
) -> EstimateReport {
    let estimate = estimates()
        .into_iter()
        .find(|e| e.name == name)
        .expect("estimate should be in the fixture");
    let estimate_items = items().remove(name).unwrap_or_default();
    EstimateReport::build(calculator, &estimate, estimate_items, sync_inversor)
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_fixtures_load() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].name, "Canadian Solar 550W");
    assert_eq!(catalog[0].prices.len(), 3);
    assert_eq!(catalog[0].prices[0].potency_kwp, dec!(3));

    let estimates = estimates();
    assert_eq!(estimates.len(), 3);
    assert_eq!(estimates[0].consumption.kwh, dec!(0.95));
    assert_eq!(estimates[0].consumption.roof_orientation.factor, dec!(1));
    assert_eq!(estimates[1].consumption.months[3], dec!(0));
    assert_eq!(estimates[1].consumption.months[6], dec!(0));

    let items = items();
    assert_eq!(items["Silva residence"].len(), 4);
    assert_eq!(items["Silva residence"][0].kind, ItemKind::Inversor);
}

// =============================================================================
// Calculation with default sizing
// =============================================================================

#[test]
fn test_silva_residence_totals() {
    let report = report(EstimateCalculator::default(), "Silva residence", false);
    let outcome = report.outcome.expect("should calculate");
    let result = &outcome.result;

    assert_eq!(result.months_average_kwh, dec!(500));
    assert_eq!(result.panels_amount, 9);
    assert_eq!(result.final_system_capacity_kwp, dec!(4.95));
    assert_eq!(result.tier.inversor, "Growatt 5k");
    assert_eq!(result.monthly_generated_energy, dec!(594));
    assert_eq!(result.yearly_generated_energy, dec!(7128));
    assert_eq!(result.co2_reduction, dec!(582.36));
    assert_eq!(result.system_area, dec!(29.70));
    assert_eq!(
        result.line_totals,
        vec![dec!(12000), dec!(7200), dec!(3000), dec!(2220)]
    );
    assert_eq!(result.system_initial_price, dec!(24420));
    assert_eq!(result.yearly_paid, dec!(5700));
    assert_eq!(outcome.final_total, dec!(23199));
    assert_eq!(
        outcome.payback,
        Payback::Period {
            months: dec!(48.84),
            years: dec!(4.07),
        }
    );
}

#[test]
fn test_silva_residence_sync_keeps_matching_inversor() {
    let kept = report(EstimateCalculator::default(), "Silva residence", false);
    let synced = report(EstimateCalculator::default(), "Silva residence", true);

    assert_eq!(synced.items, kept.items);
    assert_eq!(synced.outcome, kept.outcome);
}

#[test]
fn test_bakery_lenient_months_and_discount_line() {
    let report = report(EstimateCalculator::default(), "Bakery", false);
    let outcome = report.outcome.expect("should calculate");
    let result = &outcome.result;

    assert_eq!(result.months_average_kwh, dec!(258.33));
    assert_eq!(result.system_capacity_kwp, dec!(2.30));
    assert_eq!(result.panels_amount, 6);
    assert_eq!(result.final_system_capacity_kwp, dec!(2.46));
    assert_eq!(result.tier.inversor, "Deye 2.5k");
    assert_eq!(result.monthly_generated_energy, dec!(276.31));
    assert_eq!(result.yearly_generated_energy, dec!(3315.69));
    assert_eq!(result.co2_reduction, dec!(270.89));
    assert_eq!(result.system_area, dec!(14.76));
    assert_eq!(result.monthly_paid, dec!(211.83));
    assert_eq!(result.yearly_paid, dec!(2541.96));
    assert_eq!(result.system_initial_price, dec!(2375));
    assert_eq!(outcome.final_total, dec!(2375));
    assert_eq!(
        outcome.payback,
        Payback::Period {
            months: dec!(11.21),
            years: dec!(0.93),
        }
    );
}

#[test]
fn test_bakery_sync_inserts_inversor_line() {
    let report = report(EstimateCalculator::default(), "Bakery", true);
    let outcome = report.outcome.expect("should calculate");

    assert_eq!(report.items.len(), 3);
    assert_eq!(report.items[0].kind, ItemKind::Inversor);
    assert_eq!(report.items[0].name, "Deye 2.5k");
    assert_eq!(report.items[0].order, 0);
    // 7000 + 2500, then -5% of 9500
    assert_eq!(outcome.result.system_initial_price, dec!(9025));
}

#[test]
fn test_warehouse_is_blocked() {
    let report = report(EstimateCalculator::default(), "Warehouse", false);

    assert!(report.outcome.is_none());
    let Some(EstimateError::CapacityNotFound { largest_kwp, .. }) = report.error else {
        panic!("expected CapacityNotFound, got {:?}", report.error);
    };
    assert_eq!(largest_kwp, Some(dec!(8)));
    assert!(report.to_string().contains("BLOCKED"));
}

// =============================================================================
// Calculation with a sizing config file
// =============================================================================

#[test]
fn test_bakery_with_config_file() {
    let config = parse_sizing_config(SIZING_TOML).expect("sizing fixture should parse");
    let report = report(EstimateCalculator::new(config), "Bakery", false);
    let result = report.outcome.expect("should calculate").result;

    // Blank and non-numeric months are skipped instead of averaged as zero.
    assert_eq!(result.months_average_kwh, dec!(310));
    assert_eq!(result.panels_amount, 7);
    assert_eq!(result.final_system_capacity_kwp, dec!(2.90));
    assert_eq!(result.tier.inversor, "Deye 4k");
}
