use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};

/// A discount or increase, either relative to the subtotal or absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Percentage of the subtotal.
    Percent(Decimal),
    /// Currency amount.
    Amount(Decimal),
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::Amount(Decimal::ZERO)
    }
}

impl Adjustment {
    /// Builds an adjustment from the form's "is percent" toggle and value.
    pub fn new(
        is_percent: bool,
        value: Decimal,
    ) -> Self {
        if is_percent {
            Self::Percent(value)
        } else {
            Self::Amount(value)
        }
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Percent(_))
    }

    /// The raw value as entered, percent or currency.
    pub fn value(&self) -> Decimal {
        match self {
            Self::Percent(value) | Self::Amount(value) => *value,
        }
    }

    /// Currency amount this adjustment stands for against `subtotal`.
    ///
    /// A percentage too large to represent saturates at [`Decimal::MAX`] or
    /// [`Decimal::MIN`].
    pub fn resolve(
        &self,
        subtotal: Decimal,
    ) -> Decimal {
        match self {
            Self::Percent(rate) => subtotal
                .checked_mul(*rate)
                .map(|value| value / Decimal::ONE_HUNDRED)
                .unwrap_or_else(|| subtotal.saturating_mul(*rate / Decimal::ONE_HUNDRED)),
            Self::Amount(amount) => *amount,
        }
    }
}

/// Applies the discount and then the increase to `subtotal`.
///
/// Percentages are taken from the original subtotal, not from the discounted
/// value. The discounted price is clamped at zero before the increase is
/// added, and the final total never goes below zero. Amounts too large to
/// represent saturate instead of overflowing.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::{Adjustment, calc_final_total};
///
/// let total = calc_final_total(
///     dec!(1000),
///     Adjustment::Percent(dec!(10)),
///     Adjustment::Amount(dec!(50)),
/// );
///
/// assert_eq!(total, dec!(950));
/// ```
pub fn calc_final_total(
    subtotal: Decimal,
    discount: Adjustment,
    increase: Adjustment,
) -> Decimal {
    let discounted = max(
        subtotal.saturating_sub(discount.resolve(subtotal)),
        Decimal::ZERO,
    );
    let total = discounted.saturating_add(increase.resolve(subtotal));

    round_half_up(max(total, Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn percent_discount_without_increase() {
        let total = calc_final_total(
            dec!(1000),
            Adjustment::new(true, dec!(10)),
            Adjustment::new(false, Decimal::ZERO),
        );

        assert_eq!(total, dec!(900));
    }

    #[test]
    fn absolute_discount_without_increase() {
        let total = calc_final_total(
            dec!(1000),
            Adjustment::new(false, dec!(100)),
            Adjustment::new(false, Decimal::ZERO),
        );

        assert_eq!(total, dec!(900));
    }

    #[test]
    fn discount_larger_than_subtotal_clamps_at_zero() {
        let total = calc_final_total(
            dec!(1000),
            Adjustment::new(false, dec!(2000)),
            Adjustment::new(false, Decimal::ZERO),
        );

        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn increase_is_added_after_clamped_discount() {
        let total = calc_final_total(
            dec!(1000),
            Adjustment::Amount(dec!(2000)),
            Adjustment::Amount(dec!(150)),
        );

        assert_eq!(total, dec!(150));
    }

    #[test]
    fn percentages_are_taken_from_the_subtotal() {
        // 10% off 1000 is 100, 10% on 1000 is 100: they cancel out.
        let total = calc_final_total(
            dec!(1000),
            Adjustment::Percent(dec!(10)),
            Adjustment::Percent(dec!(10)),
        );

        assert_eq!(total, dec!(1000));
    }

    #[test]
    fn final_total_rounds_to_cents() {
        let total = calc_final_total(
            dec!(24420),
            Adjustment::Percent(dec!(3.333)),
            Adjustment::default(),
        );

        // 24420 × 3.333% = 813.9186
        assert_eq!(total, dec!(23606.08));
    }

    #[test]
    fn huge_percent_discount_clamps_at_zero() {
        let total = calc_final_total(
            dec!(1000),
            Adjustment::Percent(Decimal::MAX),
            Adjustment::default(),
        );

        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn huge_increase_saturates() {
        let total = calc_final_total(
            dec!(1000),
            Adjustment::default(),
            Adjustment::Percent(Decimal::MAX),
        );

        assert_eq!(total, Decimal::MAX);
    }

    #[test]
    fn huge_negative_discount_saturates() {
        let total = calc_final_total(
            dec!(1000),
            Adjustment::Amount(Decimal::MIN),
            Adjustment::Amount(Decimal::MAX),
        );

        assert_eq!(total, Decimal::MAX);
    }

    #[test]
    fn adjustment_accessors() {
        let discount = Adjustment::new(true, dec!(5));

        assert!(discount.is_percent());
        assert_eq!(discount.value(), dec!(5));
        assert_eq!(discount.resolve(dec!(200)), dec!(10));
        assert!(!Adjustment::default().is_percent());
    }
}
