//! Rating engine
//!
//! `rate` is a pure function: it folds the product's rule list over a state
//! seeded with the base price, then rounds the premium and each breakdown
//! entry to two decimals independently. Because of that independent
//! rounding, the displayed breakdown can differ from the displayed premium
//! by a few cents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{round_currency, ProductId};

use crate::product::{Product, ProductType};

use super::breakdown::Breakdown;
use super::request::RatingRequest;
use super::rules::{rules_for, RatingContext, RatingState, COMMON_RULES};

/// Outcome of rating one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_type: ProductType,
    /// Final premium, rounded to two decimals
    #[serde(with = "rust_decimal::serde::float")]
    pub premium_amount: Decimal,
    /// Every recorded adjustment, each rounded to two decimals
    pub breakdown: Breakdown,
    /// Requested coverage, or the product maximum when none was requested
    #[serde(with = "rust_decimal::serde::float")]
    pub coverage_amount: Decimal,
}

impl RatingResult {
    /// Difference between the premium and the sum of the displayed breakdown
    pub fn rounding_discrepancy(&self) -> Decimal {
        self.premium_amount.saturating_sub(self.breakdown.total())
    }
}

/// Rates a request against a resolved product
///
/// Never fails: rules whose inputs are missing simply do not fire.
pub fn rate(product: &Product, request: &RatingRequest) -> RatingResult {
    let ctx = RatingContext::new(product, request);

    let state = rules_for(&product.product_type)
        .iter()
        .chain(COMMON_RULES)
        .fold(RatingState::seed(product.base_price), |state, rule| {
            match rule(&ctx, &state) {
                Some(adjustment) => state.apply(adjustment),
                None => state,
            }
        });

    RatingResult {
        product_id: product.id,
        product_name: product.name.clone(),
        product_type: product.product_type.clone(),
        premium_amount: round_currency(state.premium),
        breakdown: state.breakdown.rounded(),
        coverage_amount: ctx.coverage_amount().unwrap_or(product.coverage_max),
    }
}
