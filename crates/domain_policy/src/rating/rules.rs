//! Rating rules
//!
//! Each rule inspects the request and the running state and may produce one
//! [`Adjustment`]. Rules run strictly in table order: most factors multiply
//! the running premium, so reordering them changes the result.
//!
//! A rule whose input is missing, zero, or empty does not fire. Amounts
//! saturate at the bounds of `Decimal` rather than overflowing, so extreme
//! inputs produce an extreme premium instead of a failure.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::product::{Product, ProductType};

use super::breakdown::Breakdown;
use super::request::{HealthDetails, LifeDetails, RatingRequest, VehicleDetails};
use super::tables::{CityTier, OccupationRisk, VehicleType};

/// Breakdown labels
pub mod labels {
    pub const BASE_PREMIUM: &str = "Base Premium";
    pub const VEHICLE_TYPE_FACTOR: &str = "Vehicle Type Factor";
    pub const AGE_DEPRECIATION: &str = "Age Depreciation";
    pub const IDV_COVERAGE: &str = "IDV Coverage";
    pub const CITY_FACTOR: &str = "City Factor";
    pub const YOUNG_DRIVER_SURCHARGE: &str = "Young Driver Surcharge";
    pub const SENIOR_DRIVER_SURCHARGE: &str = "Senior Driver Surcharge";
    pub const SENIOR_AGE_FACTOR: &str = "Senior Age Factor";
    pub const AGE_FACTOR: &str = "Age Factor";
    pub const PRE_EXISTING_CONDITIONS: &str = "Pre-existing Conditions";
    pub const FAMILY_DISCOUNT: &str = "Family Discount";
    pub const SMOKER_SURCHARGE: &str = "Smoker Surcharge";
    pub const ADDITIONAL_COVERAGE: &str = "Additional Coverage";
    pub const SUM_ASSURED: &str = "Sum Assured";
    pub const TERM_DISCOUNT: &str = "Term Discount";
    pub const OCCUPATION_RISK: &str = "Occupation Risk";
    pub const COVERAGE_AMOUNT: &str = "Coverage Amount";
}

use labels::*;

/// Read-only inputs shared by every rule
#[derive(Debug, Clone, Copy)]
pub struct RatingContext<'a> {
    pub product: &'a Product,
    pub request: &'a RatingRequest,
}

impl<'a> RatingContext<'a> {
    pub fn new(product: &'a Product, request: &'a RatingRequest) -> Self {
        Self { product, request }
    }

    fn vehicle(&self) -> Option<&'a VehicleDetails> {
        self.request.vehicle_details.as_ref()
    }

    fn health(&self) -> Option<&'a HealthDetails> {
        self.request.health_details.as_ref()
    }

    fn life(&self) -> Option<&'a LifeDetails> {
        self.request.life_details.as_ref()
    }

    /// Requested coverage, treating zero as not requested
    pub fn coverage_amount(&self) -> Option<Decimal> {
        nonzero(self.request.coverage_amount)
    }
}

/// Running premium and the breakdown recorded so far
#[derive(Debug, Clone, PartialEq)]
pub struct RatingState {
    pub premium: Decimal,
    pub breakdown: Breakdown,
}

impl RatingState {
    /// Starts from the base price, recorded as the first breakdown entry
    pub fn seed(base_price: Decimal) -> Self {
        let mut breakdown = Breakdown::new();
        breakdown.record(BASE_PREMIUM, base_price);
        Self {
            premium: base_price,
            breakdown,
        }
    }

    /// Applies one adjustment, returning the next state
    pub fn apply(mut self, adjustment: Adjustment) -> Self {
        self.premium = self.premium.saturating_add(adjustment.amount);
        if adjustment.recorded {
            self.breakdown.record(adjustment.label, adjustment.amount);
        }
        self
    }
}

/// Signed change to the running premium produced by one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub label: &'static str,
    pub amount: Decimal,
    /// Whether the change appears in the breakdown
    pub recorded: bool,
}

impl Adjustment {
    /// An adjustment listed in the breakdown
    pub fn recorded(label: &'static str, amount: Decimal) -> Self {
        Self { label, amount, recorded: true }
    }

    /// An adjustment that changes the premium without a breakdown entry
    pub fn unrecorded(label: &'static str, amount: Decimal) -> Self {
        Self { label, amount, recorded: false }
    }
}

/// A single rating step
pub type Rule = fn(&RatingContext<'_>, &RatingState) -> Option<Adjustment>;

pub const VEHICLE_RULES: &[Rule] = &[
    vehicle_type_factor,
    vehicle_age_depreciation,
    idv_coverage,
    city_factor,
    driver_age_surcharge,
];

pub const HEALTH_RULES: &[Rule] = &[
    health_age_factor,
    pre_existing_conditions,
    family_discount,
    health_smoker_surcharge,
    additional_coverage,
];

pub const LIFE_RULES: &[Rule] = &[
    life_age_factor,
    sum_assured,
    term_discount,
    life_smoker_surcharge,
    occupation_risk,
];

/// Rules applied after the line-specific rules, whatever the product type
pub const COMMON_RULES: &[Rule] = &[coverage_amount_fallback];

/// Returns the line-specific rules for a product type
///
/// `Unknown` product types have no line-specific rules.
pub fn rules_for(product_type: &ProductType) -> &'static [Rule] {
    match product_type {
        ProductType::Vehicle => VEHICLE_RULES,
        ProductType::Health => HEALTH_RULES,
        ProductType::Life => LIFE_RULES,
        ProductType::Unknown(_) => &[],
    }
}

fn nonzero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

fn nonzero_int(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v != 0)
}

fn is_smoker(flag: Option<bool>) -> bool {
    flag.unwrap_or(false)
}

/// Extra coverage units above a threshold, in blocks of 100,000
fn coverage_units_above(coverage: Decimal, threshold: Decimal) -> Option<Decimal> {
    (coverage > threshold).then(|| (coverage - threshold) / dec!(100000))
}

// ---------------------------------------------------------------------------
// Vehicle
// ---------------------------------------------------------------------------

/// Vehicle body factor, scaled off the base price rather than the running premium
///
/// The addition always moves the premium; only a positive addition is recorded.
fn vehicle_type_factor(ctx: &RatingContext<'_>, _state: &RatingState) -> Option<Adjustment> {
    let factor = ctx
        .vehicle()
        .and_then(|v| v.vehicle_type.as_ref())
        .map_or(VehicleType::DEFAULT_FACTOR, VehicleType::factor);
    let addition = ctx.product.base_price.saturating_mul(factor - Decimal::ONE);
    if addition.is_zero() {
        return None;
    }
    if addition > Decimal::ZERO {
        Some(Adjustment::recorded(VEHICLE_TYPE_FACTOR, addition))
    } else {
        Some(Adjustment::unrecorded(VEHICLE_TYPE_FACTOR, addition))
    }
}

/// 5% per year of vehicle age, floored at a 0.5 factor
fn vehicle_age_depreciation(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let vehicle_age = nonzero(ctx.vehicle()?.vehicle_age)?;
    let factor = (Decimal::ONE - vehicle_age * dec!(0.05)).max(dec!(0.5));
    let reduction = state.premium.saturating_mul(Decimal::ONE - factor);
    Some(Adjustment::recorded(AGE_DEPRECIATION, -reduction))
}

/// 3% of the insured declared value
fn idv_coverage(ctx: &RatingContext<'_>, _state: &RatingState) -> Option<Adjustment> {
    let idv = nonzero(ctx.vehicle()?.idv)?;
    Some(Adjustment::recorded(IDV_COVERAGE, idv.saturating_mul(dec!(0.03))))
}

fn city_factor(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let factor = ctx
        .vehicle()
        .and_then(|v| v.city.as_ref())
        .map_or(CityTier::DEFAULT_FACTOR, CityTier::factor);
    (factor > Decimal::ONE)
        .then(|| Adjustment::recorded(CITY_FACTOR, state.premium.saturating_mul(factor - Decimal::ONE)))
}

/// Under-25 and over-65 driver surcharges, mutually exclusive
fn driver_age_surcharge(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let age = ctx.request.age?;
    if age < 25 {
        Some(Adjustment::recorded(YOUNG_DRIVER_SURCHARGE, state.premium.saturating_mul(dec!(0.3))))
    } else if age > 65 {
        Some(Adjustment::recorded(SENIOR_DRIVER_SURCHARGE, state.premium.saturating_mul(dec!(0.2))))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Age bands; only the first matching band applies
fn health_age_factor(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let age = ctx.request.age?;
    let (label, rate) = if age > 60 {
        (SENIOR_AGE_FACTOR, dec!(1.5))
    } else if age > 45 {
        (AGE_FACTOR, dec!(0.8))
    } else if age > 30 {
        (AGE_FACTOR, dec!(0.3))
    } else {
        return None;
    };
    Some(Adjustment::recorded(label, state.premium.saturating_mul(rate)))
}

/// 40% of the running premium per declared condition
fn pre_existing_conditions(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let count = ctx.health()?.pre_existing_conditions.len();
    if count == 0 {
        return None;
    }
    let surcharge = state.premium.saturating_mul(dec!(0.4)).saturating_mul(Decimal::from(count));
    Some(Adjustment::recorded(PRE_EXISTING_CONDITIONS, surcharge))
}

/// 10% off per family member beyond the first
fn family_discount(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let family_size = nonzero_int(ctx.health()?.family_size).filter(|size| *size > 1)?;
    let discount = state.premium.saturating_mul(dec!(0.1)).saturating_mul(Decimal::from(family_size - 1));
    Some(Adjustment::recorded(FAMILY_DISCOUNT, -discount))
}

fn health_smoker_surcharge(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    is_smoker(ctx.health()?.smoker)
        .then(|| Adjustment::recorded(SMOKER_SURCHARGE, state.premium.saturating_mul(dec!(0.25))))
}

/// 15% per 100,000 of coverage above 200,000
fn additional_coverage(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let units = coverage_units_above(ctx.coverage_amount()?, dec!(200000))?;
    Some(Adjustment::recorded(ADDITIONAL_COVERAGE, state.premium.saturating_mul(dec!(0.15)).saturating_mul(units)))
}

// ---------------------------------------------------------------------------
// Life
// ---------------------------------------------------------------------------

/// 2% per year of age; always recorded, even when zero
fn life_age_factor(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let age = ctx.request.age.unwrap_or(0);
    let factor = Decimal::ONE + Decimal::from(age) * dec!(0.02);
    Some(Adjustment::recorded(AGE_FACTOR, state.premium.saturating_mul(factor - Decimal::ONE)))
}

/// 100 per 100,000 of sum assured
fn sum_assured(ctx: &RatingContext<'_>, _state: &RatingState) -> Option<Adjustment> {
    let sum_assured = nonzero(ctx.life()?.sum_assured)?;
    Some(Adjustment::recorded(SUM_ASSURED, sum_assured / dec!(100000) * dec!(100)))
}

/// 1% off per year of policy term
fn term_discount(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let term = nonzero_int(ctx.life()?.policy_term)?;
    let discount = state.premium.saturating_mul(Decimal::from(term) / dec!(100));
    Some(Adjustment::recorded(TERM_DISCOUNT, -discount))
}

fn life_smoker_surcharge(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    is_smoker(ctx.life()?.smoker)
        .then(|| Adjustment::recorded(SMOKER_SURCHARGE, state.premium.saturating_mul(dec!(0.5))))
}

fn occupation_risk(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    let factor = ctx
        .life()
        .and_then(|l| l.occupation.as_ref())
        .map_or(OccupationRisk::DEFAULT_FACTOR, OccupationRisk::factor);
    (factor > Decimal::ONE)
        .then(|| Adjustment::recorded(OCCUPATION_RISK, state.premium.saturating_mul(factor - Decimal::ONE)))
}

// ---------------------------------------------------------------------------
// All lines
// ---------------------------------------------------------------------------

/// 10% per 100,000 of coverage above 100,000
///
/// Skipped when the line already priced coverage through a non-zero
/// "Additional Coverage" or "IDV Coverage" entry.
fn coverage_amount_fallback(ctx: &RatingContext<'_>, state: &RatingState) -> Option<Adjustment> {
    if state.breakdown.has_nonzero(ADDITIONAL_COVERAGE) || state.breakdown.has_nonzero(IDV_COVERAGE) {
        return None;
    }
    let units = coverage_units_above(ctx.coverage_amount()?, dec!(100000))?;
    Some(Adjustment::recorded(COVERAGE_AMOUNT, state.premium.saturating_mul(dec!(0.1)).saturating_mul(units)))
}
