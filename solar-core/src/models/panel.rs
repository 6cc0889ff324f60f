use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a panel's price catalog: the inverter kit that covers systems
/// up to `potency_kwp`, and what it costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub potency_kwp: Decimal,
    pub inversor: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: i64,
    pub name: String,
    /// Rated output of a single module, in watts.
    pub capacity_w: Decimal,
    pub prices: Vec<PriceTier>,
}

impl Panel {
    /// Largest potency this panel's catalog can serve, if it has any tiers.
    pub fn largest_potency(&self) -> Option<Decimal> {
        self.prices.iter().map(|tier| tier.potency_kwp).max()
    }
}

/// Roof orientation with its performance multiplier (1.0 for an ideal roof).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoofOrientation {
    pub name: String,
    pub factor: Decimal,
}

impl RoofOrientation {
    pub fn new(
        name: impl Into<String>,
        factor: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            factor,
        }
    }
}
