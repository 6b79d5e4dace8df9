//! Common decimal helpers shared by the tax, GST and formatting code.
//!
//! Every rounding in this crate goes through these helpers so that the
//! display layer and the calculators agree on midpoint behaviour.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places (paise) using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fintrack_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_half_up_dp(value, 2)
}

/// Half-up rounding to an arbitrary number of decimal places.
pub fn round_half_up_dp(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `rate_percent` percent of `amount`, unrounded.
///
/// ```
/// use rust_decimal_macros::dec;
/// use fintrack_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(150000), dec!(5)), dec!(7500));
/// ```
pub fn percent_of(
    amount: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    amount * (rate_percent / Decimal::ONE_HUNDRED)
}

/// Returns the larger of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}
