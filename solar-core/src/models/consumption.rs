use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Panel, RoofOrientation};
use crate::numeric::coerce_decimal;

/// Number of monthly readings carried by an estimate.
pub const MONTHS: usize = 13;

/// Consumption history and site parameters for one estimate.
///
/// `months[0]` is `month_01`, the oldest reading. `months[12]` is `month_13`,
/// the current month, which is usually still incomplete when the estimate is
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionInput {
    /// Unit energy price charged by the utility (currency per kWh).
    pub kwh: Decimal,

    /// Solar irradiation at the site, in kWh/m² per day.
    pub irradiation: Decimal,

    pub panel: Panel,

    pub months: [Decimal; MONTHS],

    /// Expected growth of the monthly consumption, in kWh, added on top of
    /// the historic average.
    pub average_increase: Decimal,

    pub roof_orientation: RoofOrientation,
}

/// Consumption fields exactly as the estimate form submits them.
///
/// Every numeric field is still text; [`RawConsumption::into_input`] is the
/// boundary where bad or missing values become zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConsumption {
    pub kwh: String,
    pub irradiation: String,
    /// Monthly readings, oldest first. Fewer than 13 entries is allowed; the
    /// missing months read as zero and extra entries are ignored.
    pub months: Vec<String>,
    pub average_increase: String,
}

impl RawConsumption {
    /// Converts the form values into a [`ConsumptionInput`] for the given
    /// panel and roof orientation.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use rust_decimal_macros::dec;
    /// use solar_core::{Panel, RawConsumption, RoofOrientation};
    ///
    /// let raw = RawConsumption {
    ///     kwh: "0,95".to_string(),
    ///     irradiation: "5".to_string(),
    ///     months: vec!["1.200,50".to_string(), "abc".to_string()],
    ///     average_increase: String::new(),
    /// };
    /// let panel = Panel { id: 1, name: "Mono 550".into(), capacity_w: dec!(550), prices: vec![] };
    ///
    /// let input = raw.into_input(panel, RoofOrientation::new("North", dec!(1)));
    ///
    /// assert_eq!(input.kwh, dec!(0.95));
    /// assert_eq!(input.months[0], dec!(1200.50));
    /// assert_eq!(input.months[1], Decimal::ZERO);
    /// assert_eq!(input.months[12], Decimal::ZERO);
    /// assert_eq!(input.average_increase, Decimal::ZERO);
    /// ```
    pub fn into_input(
        self,
        panel: Panel,
        roof_orientation: RoofOrientation,
    ) -> ConsumptionInput {
        let mut months = [Decimal::ZERO; MONTHS];
        for (slot, value) in months.iter_mut().zip(self.months.iter()) {
            *slot = coerce_decimal(value);
        }

        ConsumptionInput {
            kwh: coerce_decimal(&self.kwh),
            irradiation: coerce_decimal(&self.irradiation),
            panel,
            months,
            average_increase: coerce_decimal(&self.average_increase),
            roof_orientation,
        }
    }
}
