//! Property-Based Test Generators
//!
//! Proptest strategies for products and rating requests. Generated values
//! stay inside the ranges real applicants and products use.

use core_kernel::ProductId;
use domain_policy::{
    CityTier, HealthDetails, LifeDetails, OccupationRisk, Product, ProductType, RatingRequest,
    VehicleDetails, VehicleType,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Strategy for base prices between 0.01 and 100,000.00
pub fn base_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for product types, including codes no line handles
pub fn product_type_strategy() -> impl Strategy<Value = ProductType> {
    prop_oneof![
        Just(ProductType::Vehicle),
        Just(ProductType::Health),
        Just(ProductType::Life),
        Just(ProductType::from("TRAVEL")),
    ]
}

/// Strategy for valid catalog products
pub fn product_strategy() -> impl Strategy<Value = Product> {
    (product_type_strategy(), base_price_strategy()).prop_map(|(product_type, base_price)| {
        Product::new(
            ProductId::new(),
            "Generated Product",
            product_type,
            base_price,
            dec!(100000),
            dec!(10000000),
        )
    })
}

/// Strategy for enum codes, mixing listed values with an unlisted one
fn code_strategy(codes: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        proptest::sample::select(codes).prop_map(str::to_string),
        Just("UNLISTED".to_string()),
    ])
}

pub fn vehicle_details_strategy() -> impl Strategy<Value = VehicleDetails> {
    (
        code_strategy(&["HATCHBACK", "SEDAN", "SUV", "LUXURY", "BIKE"]),
        proptest::option::of(0i64..25),
        proptest::option::of(0i64..5_000_000),
        code_strategy(&["METRO", "TIER1", "TIER2"]),
    )
        .prop_map(|(vehicle_type, vehicle_age, idv, city)| VehicleDetails {
            vehicle_type: vehicle_type.map(VehicleType::from),
            vehicle_age: vehicle_age.map(Decimal::from),
            idv: idv.map(Decimal::from),
            city: city.map(CityTier::from),
        })
}

pub fn health_details_strategy() -> impl Strategy<Value = HealthDetails> {
    (
        proptest::collection::vec("[A-Za-z]{3,12}", 0..4),
        proptest::option::of(0i32..8),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(pre_existing_conditions, family_size, smoker)| HealthDetails {
            pre_existing_conditions,
            family_size,
            smoker,
        })
}

pub fn life_details_strategy() -> impl Strategy<Value = LifeDetails> {
    (
        proptest::option::of(0i64..100_000_000),
        proptest::option::of(0i32..40),
        proptest::option::of(any::<bool>()),
        code_strategy(&["LOW", "MEDIUM", "HIGH"]),
    )
        .prop_map(|(sum_assured, policy_term, smoker, occupation)| LifeDetails {
            sum_assured: sum_assured.map(Decimal::from),
            policy_term,
            smoker,
            occupation: occupation.map(OccupationRisk::from),
        })
}

/// Strategy for arbitrary requests against one product
pub fn rating_request_strategy(product_id: ProductId) -> impl Strategy<Value = RatingRequest> {
    (
        proptest::option::of(0i32..100),
        proptest::option::of(0i64..20_000_000),
        proptest::option::of(vehicle_details_strategy()),
        proptest::option::of(health_details_strategy()),
        proptest::option::of(life_details_strategy()),
    )
        .prop_map(move |(age, coverage, vehicle, health, life)| RatingRequest {
            product_id,
            age,
            coverage_amount: coverage.map(Decimal::from),
            vehicle_details: vehicle,
            health_details: health,
            life_details: life,
        })
}

/// Strategy for a product paired with a request for it
pub fn product_and_request_strategy() -> impl Strategy<Value = (Product, RatingRequest)> {
    product_strategy().prop_flat_map(|product| {
        let id = product.id;
        (Just(product), rating_request_strategy(id))
    })
}
