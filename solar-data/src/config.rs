//! TOML configuration for the sizing constants.
//!
//! Every key is optional; anything left out keeps its default.
//!
//! ```toml
//! days_per_month = 30
//! system_efficiency = 0.80
//! co2_kg_per_kwh = "0.0817"
//! area_m2_per_kwp = 6
//! capacity_increment_kwp = 0.01
//! averaging_window = "complete_months"
//! skip_empty_months = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use solar_core::{EstimateError, SizingConfig};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] EstimateError),
}

/// Parse and validate a sizing config from TOML text.
pub fn parse_sizing_config(text: &str) -> Result<SizingConfig, ConfigError> {
    let config: SizingConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a sizing config file.
pub fn load_sizing_config(path: &Path) -> Result<SizingConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_sizing_config(&text)?;
    debug!(path = %path.display(), ?config, "loaded sizing config");
    Ok(config)
}
