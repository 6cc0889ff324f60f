//! Rounding helpers shared by the estimate calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Used for every currency and energy figure shown on an estimate.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(582.3576)), dec!(582.36));
/// assert_eq!(round_half_up(dec!(12.345)), dec!(12.35));
/// assert_eq!(round_half_up(dec!(12.344)), dec!(12.34));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value up (towards positive infinity) to `dp` places.
///
/// Capacity figures only ever round up, so the reported size never falls
/// short of the demand it was derived from.
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::common::round_up;
///
/// assert_eq!(round_up(dec!(4.5833), 2), dec!(4.59));
/// assert_eq!(round_up(dec!(4.50), 2), dec!(4.50));
/// ```
pub fn round_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::ToPositiveInfinity)
}

/// Rounds `value` up to the next multiple of `increment`.
///
/// A non-positive increment leaves the value untouched.
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::common::ceil_to_increment;
///
/// assert_eq!(ceil_to_increment(dec!(4.95), dec!(0.01)), dec!(4.95));
/// assert_eq!(ceil_to_increment(dec!(4.95), dec!(0.5)), dec!(5.0));
/// assert_eq!(ceil_to_increment(dec!(5.0), dec!(0.5)), dec!(5.0));
/// ```
pub fn ceil_to_increment(
    value: Decimal,
    increment: Decimal,
) -> Decimal {
    if increment <= Decimal::ZERO {
        return value;
    }
    match value.checked_div(increment) {
        Some(steps) => steps.ceil() * increment,
        None => value,
    }
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(1221.005)), dec!(1221.01));
        assert_eq!(round_half_up(dec!(-1221.005)), dec!(-1221.01));
    }

    #[test]
    fn round_half_up_keeps_two_place_values() {
        assert_eq!(round_half_up(dec!(24420.00)), dec!(24420.00));
    }

    #[test]
    fn round_half_up_truncates_below_midpoint() {
        assert_eq!(round_half_up(dec!(0.004)), dec!(0.00));
    }

    // =========================================================================
    // round_up tests
    // =========================================================================

    #[test]
    fn round_up_never_rounds_down() {
        assert_eq!(round_up(dec!(4.5801), 2), dec!(4.59));
        assert_eq!(round_up(dec!(0.001), 2), dec!(0.01));
    }

    #[test]
    fn round_up_handles_zero() {
        assert_eq!(round_up(Decimal::ZERO, 2), Decimal::ZERO);
    }

    // =========================================================================
    // ceil_to_increment tests
    // =========================================================================

    #[test]
    fn ceil_to_increment_rounds_to_next_step() {
        assert_eq!(ceil_to_increment(dec!(4.951), dec!(0.01)), dec!(4.96));
        assert_eq!(ceil_to_increment(dec!(6.6), dec!(0.25)), dec!(6.75));
    }

    #[test]
    fn ceil_to_increment_ignores_non_positive_increment() {
        assert_eq!(ceil_to_increment(dec!(4.951), Decimal::ZERO), dec!(4.951));
        assert_eq!(ceil_to_increment(dec!(4.951), dec!(-1)), dec!(4.951));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_picks_the_larger_value() {
        assert_eq!(max(dec!(-1100.00), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(max(dec!(900.00), Decimal::ZERO), dec!(900.00));
    }
}
