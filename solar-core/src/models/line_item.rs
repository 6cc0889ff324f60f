use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Distinguishes the catalog-driven inverter line from ordinary lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Standard,
    Inversor,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Inversor => "inversor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "standard" => Some(Self::Standard),
            "inversor" => Some(Self::Inversor),
            _ => None,
        }
    }
}

/// A priced line of an estimate.
///
/// Currency lines contribute `amount × price`. Percent lines ignore both and
/// instead add `percentage` % of the subtotal accumulated by the lines before
/// them; a negative percentage is a discount line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub percent: bool,
    #[serde(default)]
    pub percentage: Decimal,
    pub order: i32,
    #[serde(default)]
    pub kind: ItemKind,
}

impl LineItem {
    /// Creates a currency line.
    pub fn currency(
        name: impl Into<String>,
        amount: Decimal,
        price: Decimal,
        order: i32,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            price,
            percent: false,
            percentage: Decimal::ZERO,
            order,
            kind: ItemKind::Standard,
        }
    }

    /// Creates a percent line applied to the running subtotal.
    pub fn percent(
        name: impl Into<String>,
        percentage: Decimal,
        order: i32,
    ) -> Self {
        Self {
            name: name.into(),
            amount: Decimal::ZERO,
            price: Decimal::ZERO,
            percent: true,
            percentage,
            order,
            kind: ItemKind::Standard,
        }
    }

    pub fn is_inversor(&self) -> bool {
        self.kind == ItemKind::Inversor
    }
}
