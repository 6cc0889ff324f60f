pub mod catalog_loader;
pub mod config;
pub mod estimate_loader;
mod fields;
pub mod item_loader;
pub mod logging;
pub mod report;

pub use catalog_loader::{CatalogLoaderError, PanelCatalogLoader, PriceTierRecord};
pub use config::{ConfigError, load_sizing_config, parse_sizing_config};
pub use estimate_loader::{EstimateInput, EstimateLoader, EstimateLoaderError};
pub use item_loader::{ItemLoader, ItemLoaderError};
pub use report::EstimateReport;
