//! Decimal rounding for displayed amounts
//!
//! Quoted premiums and breakdown entries are rounded half-up toward positive
//! infinity, so `2.345` becomes `2.35` and `-2.345` becomes `-2.34`. Results
//! always carry exactly `dp` decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places used for every displayed amount
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds `value` to `dp` decimal places, ties toward positive infinity
///
/// # Arguments
///
/// * `value` - The amount to round
/// * `dp` - Decimal places to keep
///
/// # Returns
///
/// The rounded amount rescaled to exactly `dp` places. A negative zero
/// result is normalised to positive zero.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };

    let mut rounded = value.round_dp_with_strategy(dp, strategy);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Rounds to the standard two currency decimal places
pub fn round_currency(value: Decimal) -> Decimal {
    round_half_up(value, CURRENCY_DECIMAL_PLACES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_midpoints_round_toward_positive_infinity() {
        assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
        assert_eq!(round_currency(dec!(-2.345)), dec!(-2.34));
    }

    #[test]
    fn test_result_is_rescaled() {
        assert_eq!(round_currency(dec!(7500)).to_string(), "7500.00");
        assert_eq!(round_currency(dec!(-0.004)).to_string(), "0.00");
    }
}
