use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::estimate::EstimateError;

/// Which of the thirteen monthly readings feed the consumption average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AveragingWindow {
    /// `month_01` to `month_12`: the twelve complete months. `month_13` is
    /// the current month and is left out.
    #[default]
    CompleteMonths,

    /// All thirteen readings, the current month included.
    AllMonths,
}

impl AveragingWindow {
    /// Number of leading months the window covers.
    pub fn month_count(&self) -> usize {
        match self {
            Self::CompleteMonths => 12,
            Self::AllMonths => 13,
        }
    }
}

/// Physical and commercial constants used to size an installation.
///
/// None of these are fixed by the calculation itself; they vary with the
/// region, the equipment generation and the company's sales policy.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::SizingConfig;
///
/// let config = SizingConfig {
///     system_efficiency: dec!(0.75),
///     capacity_increment_kwp: dec!(0.5),
///     ..SizingConfig::default()
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Days used to turn daily irradiation into a monthly yield.
    pub days_per_month: Decimal,

    /// Performance ratio of the installed system (wiring, heat, inverter
    /// and soiling losses). Must be in (0, 1].
    pub system_efficiency: Decimal,

    /// Grid emission factor, kg of CO2 avoided per kWh generated.
    pub co2_kg_per_kwh: Decimal,

    /// Roof area occupied per installed kWp, in m².
    pub area_m2_per_kwp: Decimal,

    /// Smallest sellable step of installed capacity, in kWp. Must be a
    /// positive multiple of 0.01.
    pub capacity_increment_kwp: Decimal,

    pub averaging_window: AveragingWindow,

    /// When set, months with a zero reading are left out of the average
    /// instead of pulling it down.
    pub skip_empty_months: bool,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            days_per_month: Decimal::from(30),
            system_efficiency: Decimal::new(80, 2),
            co2_kg_per_kwh: Decimal::new(817, 4),
            area_m2_per_kwp: Decimal::from(6),
            capacity_increment_kwp: Decimal::new(1, 2),
            averaging_window: AveragingWindow::default(),
            skip_empty_months: false,
        }
    }
}

impl SizingConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError`] if:
    /// - `days_per_month` is not positive
    /// - `system_efficiency` is not in (0, 1]
    /// - `co2_kg_per_kwh` is negative
    /// - `area_m2_per_kwp` is negative
    /// - `capacity_increment_kwp` is not a positive multiple of 0.01
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.days_per_month <= Decimal::ZERO {
            return Err(EstimateError::InvalidDaysPerMonth(self.days_per_month));
        }
        if self.system_efficiency <= Decimal::ZERO || self.system_efficiency > Decimal::ONE {
            return Err(EstimateError::InvalidSystemEfficiency(
                self.system_efficiency,
            ));
        }
        if self.co2_kg_per_kwh < Decimal::ZERO {
            return Err(EstimateError::InvalidCo2Factor(self.co2_kg_per_kwh));
        }
        if self.area_m2_per_kwp < Decimal::ZERO {
            return Err(EstimateError::InvalidAreaFactor(self.area_m2_per_kwp));
        }
        let cent = Decimal::new(1, 2);
        if self.capacity_increment_kwp <= Decimal::ZERO
            || self.capacity_increment_kwp % cent != Decimal::ZERO
        {
            return Err(EstimateError::InvalidCapacityIncrement(
                self.capacity_increment_kwp,
            ));
        }
        Ok(())
    }
}
