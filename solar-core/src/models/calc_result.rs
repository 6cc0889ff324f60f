use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{LineItem, PriceTier};

/// Sizing, production and price figures derived from one set of inputs.
///
/// A new value is produced on every recalculation; nothing updates it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcResult {
    /// Mean of the months inside the averaging window (kWh).
    pub months_average_kwh: Decimal,

    /// Historic average plus the forecast increase (kWh).
    pub final_average_kwh: Decimal,

    /// What the customer pays per month today, before any compensation.
    pub monthly_paid: Decimal,

    pub yearly_paid: Decimal,

    /// Capacity that exactly covers the forecast consumption (kWp, rounded up).
    pub system_capacity_kwp: Decimal,

    pub panels_amount: u32,

    /// Installed capacity: whole panels, rounded up to the sellable increment.
    pub final_system_capacity_kwp: Decimal,

    pub monthly_generated_energy: Decimal,

    pub yearly_generated_energy: Decimal,

    /// Avoided emissions per year, in kg of CO2.
    pub co2_reduction: Decimal,

    /// Roof area taken by the installation, in m².
    pub system_area: Decimal,

    /// The catalog tier chosen for `final_system_capacity_kwp`.
    pub tier: PriceTier,

    /// Contribution of each line item, in item order.
    pub line_totals: Vec<Decimal>,

    /// Subtotal of all line items before discount and increase.
    pub system_initial_price: Decimal,
}

/// Result of a calculation together with the item list it priced.
///
/// `items` is always a fresh copy of the caller's list, carrying the synced
/// inversor line when the calculation was asked to update it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    pub result: CalcResult,
    pub items: Vec<LineItem>,
}

/// Time for the bill savings to pay for the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payback {
    /// The customer pays nothing today, so there is nothing to amortize against.
    Undefined,
    Period { months: Decimal, years: Decimal },
}

impl Payback {
    pub fn months(&self) -> Option<Decimal> {
        match self {
            Self::Undefined => None,
            Self::Period { months, .. } => Some(*months),
        }
    }

    pub fn years(&self) -> Option<Decimal> {
        match self {
            Self::Undefined => None,
            Self::Period { years, .. } => Some(*years),
        }
    }
}
