//! Lenient numeric boundary for values typed into estimate forms.
//!
//! The calculator never sees text. Everything that arrives as a string goes
//! through [`coerce_decimal`] first, so a single bad field degrades the
//! estimate to a zero in that field instead of failing the whole calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Normalizes a form value for parsing.
///
/// When both separators appear, the one written last is the decimal point
/// and the other is a thousands separator: `1.234,56` and `1,234.56` are
/// both 1234.56. A lone comma is a decimal comma (`0,95`). Without a comma
/// the value is taken as written.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    match (trimmed.rfind(','), trimmed.rfind('.')) {
        (Some(comma), Some(dot)) if dot > comma => trimmed.replace(',', ""),
        (Some(_), _) => trimmed.replace('.', "").replace(',', "."),
        (None, _) => trimmed.to_string(),
    }
}

/// Parses a form value into a [`Decimal`], falling back to zero.
///
/// Empty or whitespace-only input is zero. Input that is not a number is
/// also zero, and a warning is logged.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use solar_core::numeric::coerce_decimal;
///
/// assert_eq!(coerce_decimal("1234.56"), dec!(1234.56));
/// assert_eq!(coerce_decimal("1.234,56"), dec!(1234.56));
/// assert_eq!(coerce_decimal(""), Decimal::ZERO);
/// assert_eq!(coerce_decimal("n/a"), Decimal::ZERO);
/// ```
pub fn coerce_decimal(s: &str) -> Decimal {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        tracing::warn!(input = %s, "non-numeric value coerced to zero: {}", e);
        Decimal::ZERO
    })
}

/// Serde adapter that reads a possibly blank text cell through [`coerce_decimal`].
///
/// Use with `#[serde(default, deserialize_with = "lenient_decimal")]` so a
/// missing column reads as zero too.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.as_deref().map(coerce_decimal).unwrap_or(Decimal::ZERO))
}
