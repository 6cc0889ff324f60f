use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::calculations::estimate::EstimateError;
use crate::models::{ItemKind, LineItem, PriceTier};

/// Whether a calculation may rewrite the inversor line from the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSync {
    /// Price the items exactly as given.
    #[default]
    Keep,

    /// Point the inversor line at the selected tier first, inserting one if
    /// the list has none.
    Update,
}

impl From<bool> for ItemSync {
    fn from(update: bool) -> Self {
        if update { Self::Update } else { Self::Keep }
    }
}

/// Line totals and subtotal of an item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItems {
    pub line_totals: Vec<Decimal>,
    pub subtotal: Decimal,
}

/// Prices the items in list order.
///
/// Currency lines add `amount × price`. Percent lines add `percentage` % of
/// the subtotal accumulated so far, so moving a percent line changes the
/// result: it only sees the lines above it.
///
/// # Errors
///
/// Returns [`EstimateError::Overflow`] when a line total or the subtotal is
/// too large to represent.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::LineItem;
/// use solar_core::calculations::price_items;
///
/// let items = vec![
///     LineItem::currency("Modules", dec!(2), dec!(100), 1),
///     LineItem::percent("Freight", dec!(10), 2),
/// ];
///
/// let priced = price_items(&items).unwrap();
///
/// assert_eq!(priced.line_totals, vec![dec!(200), dec!(20)]);
/// assert_eq!(priced.subtotal, dec!(220));
/// ```
pub fn price_items(items: &[LineItem]) -> Result<PricedItems, EstimateError> {
    let mut subtotal = Decimal::ZERO;
    let mut line_totals = Vec::with_capacity(items.len());

    for item in items {
        let line_total = if item.percent {
            subtotal
                .checked_mul(item.percentage)
                .map(|value| value / Decimal::ONE_HUNDRED)
        } else {
            item.amount.checked_mul(item.price)
        }
        .map(round_half_up)
        .ok_or(EstimateError::Overflow("line item total"))?;

        subtotal = subtotal
            .checked_add(line_total)
            .ok_or(EstimateError::Overflow("subtotal"))?;
        line_totals.push(line_total);
    }

    Ok(PricedItems {
        line_totals,
        subtotal,
    })
}

/// Returns a copy of `items` whose inversor line reflects `tier`.
///
/// The first [`ItemKind::Inversor`] line takes the tier's label and price
/// with an amount of one. Without such a line, one is inserted at the top
/// with order 0. The input slice is left as it was.
pub fn sync_inversor(
    items: &[LineItem],
    tier: &PriceTier,
) -> Vec<LineItem> {
    let mut synced = items.to_vec();

    match synced.iter_mut().find(|item| item.is_inversor()) {
        Some(line) => {
            debug!(from = %line.name, to = %tier.inversor, "updating inversor line");
            line.name = tier.inversor.clone();
            line.amount = Decimal::ONE;
            line.price = tier.price;
            line.percent = false;
            line.percentage = Decimal::ZERO;
        }
        None => {
            debug!(inversor = %tier.inversor, "inserting inversor line");
            synced.insert(
                0,
                LineItem {
                    kind: ItemKind::Inversor,
                    ..LineItem::currency(tier.inversor.clone(), Decimal::ONE, tier.price, 0)
                },
            );
        }
    }

    synced
}
