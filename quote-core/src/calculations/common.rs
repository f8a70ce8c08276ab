//! Common utility functions for quote calculations.
//!
//! Calculations keep full precision; rounding here is for presentation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(8064.375)), dec!(8064.38));
/// assert_eq!(round_half_up(dec!(1051.874)), dec!(1051.87));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds half-up and pins the scale to two places, so `1725` displays as
/// `1725.00`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::to_currency_places;
///
/// assert_eq!(to_currency_places(dec!(1725)).to_string(), "1725.00");
/// assert_eq!(to_currency_places(dec!(506.25)).to_string(), "506.25");
/// ```
pub fn to_currency_places(value: Decimal) -> Decimal {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
