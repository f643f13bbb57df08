//! Custom Assertion Helpers
//!
//! Assertions over rating results with messages that show the breakdown.

use domain_policy::RatingResult;
use rust_decimal::Decimal;

/// Asserts the breakdown labels appear exactly in the given order
pub fn assert_breakdown_labels(result: &RatingResult, expected: &[&str]) {
    let labels = result.breakdown.labels();
    assert_eq!(
        labels, expected,
        "Breakdown labels differ for {}: {:?}",
        result.product_name, result.breakdown
    );
}

/// Asserts premium and every breakdown amount carry exactly two decimals
pub fn assert_currency_scale(result: &RatingResult) {
    assert_eq!(
        result.premium_amount.scale(),
        2,
        "Premium {} is not rounded to cents",
        result.premium_amount
    );
    for entry in &result.breakdown {
        assert_eq!(
            entry.amount.scale(),
            2,
            "Breakdown entry {} = {} is not rounded to cents",
            entry.label,
            entry.amount
        );
    }
}

/// Asserts a decimal value is within a range (inclusive)
pub fn assert_decimal_in_range(value: Decimal, min: Decimal, max: Decimal) {
    assert!(
        value >= min && value <= max,
        "Value {} should be in range [{}, {}]",
        value,
        min,
        max
    );
}
