use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use solar_core::{EstimateCalculator, SizingConfig};
use solar_data::logging::init_logging;
use solar_data::{
    EstimateLoader, EstimateReport, ItemLoader, PanelCatalogLoader, load_sizing_config,
};
use tracing::{info, warn};

/// Calculate solar estimates from CSV files.
///
/// Reads a panel price catalog, a set of estimates and, optionally, their
/// line items, then prints sizing, pricing and payback for each estimate.
#[derive(Parser, Debug)]
#[command(name = "solar-estimate")]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV with one row per panel price tier (panel, capacity_w, potency, inversor, price)
    #[arg(short, long)]
    catalog: PathBuf,

    /// CSV with one row per estimate
    #[arg(short, long)]
    estimates: PathBuf,

    /// CSV with the line items of each estimate
    #[arg(short, long)]
    items: Option<PathBuf>,

    /// TOML file overriding the sizing constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Point each estimate's inversor line at the selected price tier
    #[arg(short, long, default_value_t = false)]
    sync_inversor: bool,

    /// Log filter (e.g. "debug" or "solar_core=trace"); defaults to RUST_LOG, then "info"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref())?;

    let config = match &args.config {
        Some(path) => load_sizing_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SizingConfig::default(),
    };
    let calculator = EstimateCalculator::new(config);

    let file = File::open(&args.catalog)
        .with_context(|| format!("Failed to open: {}", args.catalog.display()))?;
    let catalog = PanelCatalogLoader::load(file)
        .with_context(|| format!("Failed to parse catalog: {}", args.catalog.display()))?;
    info!(panels = catalog.len(), "loaded panel catalog");

    let file = File::open(&args.estimates)
        .with_context(|| format!("Failed to open: {}", args.estimates.display()))?;
    let estimates = EstimateLoader::parse(file, &catalog)
        .with_context(|| format!("Failed to parse estimates: {}", args.estimates.display()))?;
    info!(estimates = estimates.len(), "loaded estimates");

    let mut items = match &args.items {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            ItemLoader::parse(file)
                .with_context(|| format!("Failed to parse items: {}", path.display()))?
        }
        None => Default::default(),
    };

    let mut blocked = 0;
    for estimate in &estimates {
        let estimate_items = items.remove(&estimate.name).unwrap_or_default();
        let report = EstimateReport::build(
            calculator.clone(),
            estimate,
            estimate_items,
            args.sync_inversor,
        );
        if report.is_blocked() {
            blocked += 1;
        }
        println!("{report}");
    }

    for name in items.keys() {
        warn!(estimate = %name, "line items reference an unknown estimate");
    }

    println!(
        "Calculated {} estimates ({} blocked).",
        estimates.len(),
        blocked
    );

    Ok(())
}
