use rust_decimal::Decimal;

use crate::calculations::common::{max, round_half_up};
use crate::models::Payback;

/// Time for the current bill to pay for the system.
///
/// Months are `final_total / (yearly_paid / 12)`, years are months / 12,
/// both rounded half-up to two places. A customer who pays nothing today
/// has no payback, reported as [`Payback::Undefined`]. A negative final
/// total counts as zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::{Payback, pay_back};
///
/// assert_eq!(
///     pay_back(dec!(12000), dec!(5000)),
///     Payback::Period { months: dec!(5), years: dec!(0.42) },
/// );
/// assert_eq!(pay_back(dec!(0), dec!(5000)), Payback::Undefined);
/// ```
pub fn pay_back(
    yearly_paid: Decimal,
    final_total: Decimal,
) -> Payback {
    if yearly_paid <= Decimal::ZERO {
        return Payback::Undefined;
    }

    let monthly_paid = yearly_paid / Decimal::from(12);
    let Some(months) = max(final_total, Decimal::ZERO).checked_div(monthly_paid) else {
        return Payback::Undefined;
    };

    Payback::Period {
        months: round_half_up(months),
        years: round_half_up(months / Decimal::from(12)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn pay_back_divides_total_by_monthly_bill() {
        let payback = pay_back(dec!(5700), dec!(23199));

        assert_eq!(
            payback,
            Payback::Period {
                months: dec!(48.84),
                years: dec!(4.07),
            }
        );
    }

    #[test]
    fn pay_back_zero_yearly_paid_is_undefined() {
        let payback = pay_back(Decimal::ZERO, dec!(5000));

        assert_eq!(payback, Payback::Undefined);
        assert_eq!(payback.months(), None);
        assert_eq!(payback.years(), None);
    }

    #[test]
    fn pay_back_negative_yearly_paid_is_undefined() {
        assert_eq!(pay_back(dec!(-100), dec!(5000)), Payback::Undefined);
    }

    #[test]
    fn pay_back_free_system_is_immediate() {
        let payback = pay_back(dec!(5700), Decimal::ZERO);

        assert_eq!(payback.months(), Some(Decimal::ZERO));
        assert_eq!(payback.years(), Some(Decimal::ZERO));
    }

    #[test]
    fn pay_back_negative_total_counts_as_zero() {
        assert_eq!(pay_back(dec!(5700), dec!(-10)).months(), Some(Decimal::ZERO));
    }
}
