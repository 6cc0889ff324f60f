use rust_decimal::Decimal;

use crate::models::PriceTier;

/// Picks the smallest catalog tier that still covers `required_kwp`.
///
/// Tiers do not need to be sorted. When several tiers share the smallest
/// qualifying potency, the first one listed wins. Returns `None` when every
/// tier is smaller than the requirement.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::PriceTier;
/// use solar_core::calculations::select_tier;
///
/// let tiers = vec![
///     PriceTier { potency_kwp: dec!(8), inversor: "8 kW".into(), price: dec!(18000) },
///     PriceTier { potency_kwp: dec!(5), inversor: "5 kW".into(), price: dec!(12000) },
/// ];
///
/// assert_eq!(select_tier(&tiers, dec!(4.95)).map(|t| t.inversor.as_str()), Some("5 kW"));
/// assert_eq!(select_tier(&tiers, dec!(9)), None);
/// ```
pub fn select_tier(
    tiers: &[PriceTier],
    required_kwp: Decimal,
) -> Option<&PriceTier> {
    tiers
        .iter()
        .filter(|tier| tier.potency_kwp >= required_kwp)
        .min_by_key(|tier| tier.potency_kwp)
}
