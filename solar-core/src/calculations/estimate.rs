//! Sizing and pricing of a solar estimate.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Average of the monthly readings inside the averaging window |
//! | 2    | Forecast consumption: step 1 + expected increase |
//! | 3    | Monthly yield per kWp: irradiation × days × efficiency × orientation factor |
//! | 4    | Required capacity: step 2 / step 3 |
//! | 5    | Panels: step 4 in watts / panel capacity, rounded up |
//! | 6    | Installed capacity: panels × panel capacity, rounded up to the sellable increment |
//! | 7    | Price tier: smallest catalog tier covering step 6 |
//! | 8    | Line items: optional inversor sync, then sequential subtotal |
//! | 9    | Generation, CO2 and area from step 6 |
//! | 10   | Current bill: step 1 × unit energy price |
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use rust_decimal_macros::dec;
//! use solar_core::{
//!     ConsumptionInput, EstimateCalculator, ItemSync, LineItem, Panel, PriceTier,
//!     RoofOrientation, SizingConfig,
//! };
//!
//! let mut months = [dec!(500); 13];
//! months[12] = Decimal::ZERO;
//!
//! let input = ConsumptionInput {
//!     kwh: dec!(0.95),
//!     irradiation: dec!(5),
//!     panel: Panel {
//!         id: 1,
//!         name: "Mono 550".into(),
//!         capacity_w: dec!(550),
//!         prices: vec![
//!             PriceTier { potency_kwp: dec!(3), inversor: "3 kW".into(), price: dec!(9000) },
//!             PriceTier { potency_kwp: dec!(5), inversor: "5 kW".into(), price: dec!(12000) },
//!         ],
//!     },
//!     months,
//!     average_increase: dec!(50),
//!     roof_orientation: RoofOrientation::new("North", dec!(1)),
//! };
//! let items = vec![LineItem::currency("Modules", dec!(9), dec!(800), 1)];
//!
//! let calculator = EstimateCalculator::new(SizingConfig::default());
//! let calculation = calculator.calculate(&input, &items, ItemSync::Update).unwrap();
//!
//! assert_eq!(calculation.result.panels_amount, 9);
//! assert_eq!(calculation.result.final_system_capacity_kwp, dec!(4.95));
//! assert_eq!(calculation.result.tier.inversor, "5 kW");
//! assert_eq!(calculation.result.system_initial_price, dec!(19200));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::catalog::select_tier;
use crate::calculations::common::{ceil_to_increment, max, round_half_up, round_up};
use crate::calculations::config::SizingConfig;
use crate::calculations::items::{ItemSync, price_items, sync_inversor};
use crate::models::{CalcResult, Calculation, ConsumptionInput, LineItem};

/// Errors that can occur while calculating an estimate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EstimateError {
    /// The installation is larger than anything in the panel's price catalog.
    ///
    /// The estimate must not be submitted in this state.
    #[error(
        "no price tier covers {required_kwp} kWp (largest available: {})",
        largest_display(.largest_kwp)
    )]
    CapacityNotFound {
        required_kwp: Decimal,
        largest_kwp: Option<Decimal>,
    },

    #[error("days per month must be positive, got {0}")]
    InvalidDaysPerMonth(Decimal),

    #[error("system efficiency must be between 0 and 1, got {0}")]
    InvalidSystemEfficiency(Decimal),

    #[error("CO2 factor must be non-negative, got {0}")]
    InvalidCo2Factor(Decimal),

    #[error("area per kWp must be non-negative, got {0}")]
    InvalidAreaFactor(Decimal),

    #[error("capacity increment must be a positive multiple of 0.01, got {0}")]
    InvalidCapacityIncrement(Decimal),

    /// An input is too large for the named figure to be represented.
    #[error("value too large to calculate the {0}")]
    Overflow(&'static str),
}

fn largest_display(largest: &Option<Decimal>) -> String {
    largest
        .map(|kwp| format!("{kwp} kWp"))
        .unwrap_or_else(|| "none".to_string())
}

/// Calculator for solar estimates.
///
/// Holds only its configuration; every call works on the inputs it is given
/// and can run concurrently with any other call.
#[derive(Debug, Clone, Default)]
pub struct EstimateCalculator {
    config: SizingConfig,
}

impl EstimateCalculator {
    pub fn new(config: SizingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// Calculates sizing, production and subtotal for an estimate.
    ///
    /// With [`ItemSync::Update`] the inversor line of the returned item list
    /// is pointed at the selected catalog tier. With [`ItemSync::Keep`] the
    /// returned list equals `items`. `items` itself is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::CapacityNotFound`] if no tier of the panel's
    /// catalog covers the installed capacity, or a validation variant if the
    /// configuration is invalid.
    pub fn calculate(
        &self,
        input: &ConsumptionInput,
        items: &[LineItem],
        sync: ItemSync,
    ) -> Result<Calculation, EstimateError> {
        self.config.validate()?;

        let months_average_kwh = self.months_average(&input.months)?;
        let final_average_kwh = months_average_kwh
            .checked_add(input.average_increase)
            .ok_or(EstimateError::Overflow("forecast consumption"))?;

        let yield_per_kwp = self.monthly_yield_per_kwp(input)?;
        let required_kwp = self.required_capacity(final_average_kwh, yield_per_kwp)?;
        let largest_kwp = input.panel.largest_potency();
        let not_found = |required_kwp: Decimal| {
            warn!(
                panel = %input.panel.name,
                %required_kwp,
                ?largest_kwp,
                "no price tier covers the installed capacity"
            );
            EstimateError::CapacityNotFound {
                required_kwp,
                largest_kwp,
            }
        };

        let (panels_amount, final_kwp) = self
            .panels_amount(required_kwp, input.panel.capacity_w)
            .and_then(|panels| {
                self.installed_capacity(panels, input.panel.capacity_w)
                    .map(|kwp| (panels, kwp))
            })
            .ok_or_else(|| not_found(round_up(required_kwp, 2)))?;

        let tier = select_tier(&input.panel.prices, final_kwp)
            .ok_or_else(|| not_found(final_kwp))?
            .clone();
        debug!(potency = %tier.potency_kwp, inversor = %tier.inversor, "selected price tier");

        let items = match sync {
            ItemSync::Keep => items.to_vec(),
            ItemSync::Update => sync_inversor(items, &tier),
        };
        let priced = price_items(&items)?;

        let monthly_energy = final_kwp
            .checked_mul(yield_per_kwp)
            .ok_or(EstimateError::Overflow("generated energy"))?;
        let yearly_energy = monthly_energy
            .checked_mul(Decimal::from(12))
            .ok_or(EstimateError::Overflow("generated energy"))?;
        let co2_reduction = yearly_energy
            .checked_mul(self.config.co2_kg_per_kwh)
            .ok_or(EstimateError::Overflow("CO2 reduction"))?;
        let system_area = final_kwp
            .checked_mul(self.config.area_m2_per_kwp)
            .ok_or(EstimateError::Overflow("system area"))?;
        let monthly_paid = months_average_kwh
            .checked_mul(input.kwh)
            .map(round_half_up)
            .ok_or(EstimateError::Overflow("current bill"))?;
        let yearly_paid = monthly_paid
            .checked_mul(Decimal::from(12))
            .ok_or(EstimateError::Overflow("current bill"))?;

        let result = CalcResult {
            months_average_kwh,
            final_average_kwh,
            monthly_paid,
            yearly_paid: round_half_up(yearly_paid),
            system_capacity_kwp: round_up(required_kwp, 2),
            panels_amount,
            final_system_capacity_kwp: final_kwp,
            monthly_generated_energy: round_half_up(monthly_energy),
            yearly_generated_energy: round_half_up(yearly_energy),
            co2_reduction: round_half_up(co2_reduction),
            system_area: round_half_up(system_area),
            tier,
            line_totals: priced.line_totals,
            system_initial_price: priced.subtotal,
        };

        Ok(Calculation { result, items })
    }

    /// Mean of the readings inside the averaging window, in kWh.
    fn months_average(
        &self,
        months: &[Decimal],
    ) -> Result<Decimal, EstimateError> {
        let window = &months[..self.config.averaging_window.month_count().min(months.len())];

        let (sum, count) = window
            .iter()
            .filter(|kwh| !self.config.skip_empty_months || !kwh.is_zero())
            .try_fold((Decimal::ZERO, 0u32), |(sum, count), kwh| {
                sum.checked_add(*kwh).map(|sum| (sum, count + 1))
            })
            .ok_or(EstimateError::Overflow("consumption average"))?;

        if count == 0 {
            return Ok(Decimal::ZERO);
        }
        Ok(round_half_up(sum / Decimal::from(count)))
    }

    /// kWh produced per month by each installed kWp at this site.
    fn monthly_yield_per_kwp(
        &self,
        input: &ConsumptionInput,
    ) -> Result<Decimal, EstimateError> {
        input
            .irradiation
            .checked_mul(self.config.days_per_month)
            .and_then(|value| value.checked_mul(self.config.system_efficiency))
            .and_then(|value| value.checked_mul(input.roof_orientation.factor))
            .ok_or(EstimateError::Overflow("monthly yield"))
    }

    /// Capacity that covers the forecast consumption exactly, in kWp.
    fn required_capacity(
        &self,
        final_average_kwh: Decimal,
        yield_per_kwp: Decimal,
    ) -> Result<Decimal, EstimateError> {
        if yield_per_kwp <= Decimal::ZERO || final_average_kwh <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        final_average_kwh
            .checked_div(yield_per_kwp)
            .ok_or(EstimateError::Overflow("required capacity"))
    }

    /// Whole panels needed to reach `required_kwp`, or `None` when the count
    /// does not fit a `u32`.
    fn panels_amount(
        &self,
        required_kwp: Decimal,
        panel_capacity_w: Decimal,
    ) -> Option<u32> {
        if panel_capacity_w <= Decimal::ZERO {
            return Some(0);
        }
        required_kwp
            .checked_mul(Decimal::ONE_THOUSAND)?
            .checked_div(panel_capacity_w)?
            .ceil()
            .to_u32()
    }

    /// Capacity actually installed, rounded up to the sellable increment.
    fn installed_capacity(
        &self,
        panels_amount: u32,
        panel_capacity_w: Decimal,
    ) -> Option<Decimal> {
        let watts =
            Decimal::from(panels_amount).checked_mul(max(panel_capacity_w, Decimal::ZERO))?;
        Some(ceil_to_increment(
            watts / Decimal::ONE_THOUSAND,
            self.config.capacity_increment_kwp,
        ))
    }
}

/// Calculates an estimate with the default [`SizingConfig`].
///
/// `sync` accepts a plain `bool` too: `true` lets the calculation update the
/// inversor line from the selected tier.
pub fn calculate(
    consumption: &ConsumptionInput,
    items: &[LineItem],
    sync: impl Into<ItemSync>,
) -> Result<Calculation, EstimateError> {
    EstimateCalculator::default().calculate(consumption, items, sync.into())
}
