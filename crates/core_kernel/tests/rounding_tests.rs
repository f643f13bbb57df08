//! Tests for display rounding
//!
//! Amounts are rounded half toward positive infinity and always rendered
//! with two decimal places.

use core_kernel::{round_currency, round_half_up};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod midpoints {
    use super::*;

    #[test]
    fn test_positive_midpoint_rounds_up() {
        assert_eq!(round_currency(dec!(0.125)), dec!(0.13));
        assert_eq!(round_currency(dec!(16.26625)), dec!(16.27));
    }

    #[test]
    fn test_negative_midpoint_rounds_toward_zero() {
        assert_eq!(round_currency(dec!(-0.125)), dec!(-0.12));
        assert_eq!(round_currency(dec!(-2880.005)), dec!(-2880.00));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round_currency(dec!(3.003)), dec!(3.00));
        assert_eq!(round_currency(dec!(3.25325)), dec!(3.25));
    }
}

mod scale {
    use super::*;

    #[test]
    fn test_integers_gain_two_places() {
        assert_eq!(round_currency(dec!(14400)).to_string(), "14400.00");
    }

    #[test]
    fn test_negative_zero_is_normalised() {
        let rounded = round_currency(dec!(-0.001));
        assert!(rounded.is_zero());
        assert_eq!(rounded.to_string(), "0.00");
    }

    #[test]
    fn test_other_precisions() {
        assert_eq!(round_half_up(dec!(1.5), 0), dec!(2));
        assert_eq!(round_half_up(dec!(-1.5), 0), dec!(-1));
        assert_eq!(round_half_up(dec!(1.23456), 4).to_string(), "1.2346");
    }
}

proptest! {
    #[test]
    fn prop_rounding_stays_within_half_a_cent(cents in -10_000_000i64..10_000_000i64, frac in 0u32..1000) {
        let value = Decimal::new(cents, 2) + Decimal::new(frac as i64, 5);
        let rounded = round_currency(value);
        prop_assert!((rounded - value).abs() <= dec!(0.005));
        prop_assert_eq!(rounded.scale(), 2);
    }
}
