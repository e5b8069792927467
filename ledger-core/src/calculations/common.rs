//! Shared amount handling: rounding, clamping, lenient parsing and display.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ledger_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(266.665)), dec!(266.67));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use ledger_core::calculations::common::max;
///
/// assert_eq!(max(Decimal::ZERO, dec!(-42.10)), Decimal::ZERO);
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Largest magnitude [`parse_amount`] accepts, in whole currency units.
pub const AMOUNT_LIMIT: i64 = 1_000_000_000_000_000;

/// Parses an amount typed into a form control.
///
/// Surrounding whitespace and comma thousands separators are ignored.
/// Empty input is zero. Anything else that does not parse, or whose
/// magnitude exceeds [`AMOUNT_LIMIT`], is also zero, logged at `warn`.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use ledger_core::calculations::common::parse_amount;
///
/// assert_eq!(parse_amount(" 1,234.50 "), dec!(1234.50));
/// assert_eq!(parse_amount(""), Decimal::ZERO);
/// assert_eq!(parse_amount("abc"), Decimal::ZERO);
/// assert_eq!(parse_amount("1e20"), Decimal::ZERO);
/// ```
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    let value = match normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
    {
        Ok(value) => value,
        Err(e) => {
            warn!(input = %s, "unparsable amount treated as zero: {}", e);
            return Decimal::ZERO;
        }
    };

    if value.abs() > Decimal::from(AMOUNT_LIMIT) {
        warn!(input = %s, limit = AMOUNT_LIMIT, "amount out of range treated as zero");
        return Decimal::ZERO;
    }
    value
}

/// Formats an amount for display with exactly two decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ledger_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(30)), "30.00");
/// assert_eq!(format_amount(dec!(166.6666666)), "166.67");
/// ```
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}
