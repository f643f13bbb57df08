//! Premium Rating Tests
//!
//! End-to-end checks of `rate` against worked examples for each line of
//! business, plus property tests for the engine's general guarantees.
//!
//! # Test Organization
//!
//! - `vehicle_tests` - VEHICLE rule chain
//! - `health_tests` - HEALTH rule chain
//! - `life_tests` - LIFE rule chain
//! - `fallback_tests` - generic coverage rule and unknown product types
//! - `rounding_tests` - independent rounding of premium and breakdown
//! - `property_tests` - proptest properties over arbitrary inputs

use core_kernel::ProductId;
use domain_policy::rating::labels;
use domain_policy::{
    rate, CityTier, HealthDetails, LifeDetails, OccupationRisk, Product, ProductType,
    RatingRequest, VehicleDetails, VehicleType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn product(product_type: ProductType, base_price: Decimal) -> Product {
    Product::new(
        ProductId::new(),
        "Test Product",
        product_type,
        base_price,
        dec!(100000),
        dec!(5000000),
    )
}

fn breakdown_pairs(result: &domain_policy::RatingResult) -> Vec<(String, Decimal)> {
    result
        .breakdown
        .iter()
        .map(|e| (e.label.clone(), e.amount))
        .collect()
}

fn pairs(expected: &[(&str, Decimal)]) -> Vec<(String, Decimal)> {
    expected.iter().map(|(l, a)| (l.to_string(), *a)).collect()
}

// ============================================================================
// VEHICLE
// ============================================================================

mod vehicle_tests {
    use super::*;

    /// SUV at base 5000 adds half the base price and nothing else
    #[test]
    fn test_suv_thirty_year_old() {
        let product = product(ProductType::Vehicle, dec!(5000));
        let request = RatingRequest::new(product.id)
            .with_age(30)
            .with_vehicle(VehicleDetails {
                vehicle_type: Some(VehicleType::Suv),
                ..Default::default()
            });

        let result = rate(&product, &request);

        assert_eq!(result.premium_amount.to_string(), "7500.00");
        assert_eq!(
            breakdown_pairs(&result),
            pairs(&[
                (labels::BASE_PREMIUM, dec!(5000.00)),
                (labels::VEHICLE_TYPE_FACTOR, dec!(2500.00)),
            ])
        );
        assert_eq!(result.coverage_amount, dec!(5000000));
    }

    /// Every vehicle rule fires in order on the running premium
    #[test]
    fn test_full_vehicle_chain() {
        let product = product(ProductType::Vehicle, dec!(5000));
        let request = RatingRequest::new(product.id)
            .with_age(22)
            .with_coverage(dec!(1000000))
            .with_vehicle(VehicleDetails {
                vehicle_type: Some(VehicleType::Sedan),
                vehicle_age: Some(dec!(4)),
                idv: Some(dec!(500000)),
                city: Some(CityTier::Metro),
            });

        let result = rate(&product, &request);

        // 5000 +1000 -1200 +15000 +3960 +7128
        assert_eq!(result.premium_amount, dec!(30888.00));
        assert_eq!(
            breakdown_pairs(&result),
            pairs(&[
                (labels::BASE_PREMIUM, dec!(5000)),
                (labels::VEHICLE_TYPE_FACTOR, dec!(1000)),
                (labels::AGE_DEPRECIATION, dec!(-1200)),
                (labels::IDV_COVERAGE, dec!(15000)),
                (labels::CITY_FACTOR, dec!(3960)),
                (labels::YOUNG_DRIVER_SURCHARGE, dec!(7128)),
            ])
        );
        assert_eq!(result.coverage_amount, dec!(1000000));
    }

    /// Senior drivers pay 20% on the running premium
    #[test]
    fn test_senior_driver_surcharge() {
        let product = product(ProductType::Vehicle, dec!(5000));
        let request = RatingRequest::new(product.id).with_age(70);

        let result = rate(&product, &request);

        assert_eq!(result.premium_amount, dec!(6000.00));
        assert_eq!(result.breakdown.get(labels::SENIOR_DRIVER_SURCHARGE), Some(dec!(1000)));
        assert_eq!(result.breakdown.get(labels::YOUNG_DRIVER_SURCHARGE), None);
    }

    /// BIKE lowers the premium without a breakdown entry
    #[test]
    fn test_bike_discount_not_itemised() {
        let product = product(ProductType::Vehicle, dec!(1500));
        let request = RatingRequest::new(product.id)
            .with_age(30)
            .with_vehicle(VehicleDetails {
                vehicle_type: Some(VehicleType::Bike),
                ..Default::default()
            });

        let result = rate(&product, &request);

        assert_eq!(result.premium_amount, dec!(450.00));
        assert_eq!(result.breakdown.labels(), vec![labels::BASE_PREMIUM]);
        assert_eq!(result.rounding_discrepancy(), dec!(-1050.00));
    }

    /// An unlisted vehicle type rates exactly like no vehicle type
    #[test]
    fn test_spaceship_matches_absent_type() {
        let product = product(ProductType::Vehicle, dec!(5000));
        let spaceship: RatingRequest = serde_json::from_value(serde_json::json!({
            "productId": product.id,
            "age": 40,
            "vehicleDetails": { "vehicleType": "SPACESHIP", "city": "TIER1" }
        }))
        .unwrap();
        let absent: RatingRequest = serde_json::from_value(serde_json::json!({
            "productId": product.id,
            "age": 40,
            "vehicleDetails": { "city": "TIER1" }
        }))
        .unwrap();

        let with_unknown = rate(&product, &spaceship);
        let without = rate(&product, &absent);

        assert_eq!(with_unknown, without);
        assert_eq!(with_unknown.breakdown.get(labels::VEHICLE_TYPE_FACTOR), None);
        assert_eq!(with_unknown.premium_amount, dec!(5500.00));
    }

    /// Without an IDV the generic coverage rule prices the coverage
    #[test]
    fn test_coverage_fallback_without_idv() {
        let product = product(ProductType::Vehicle, dec!(5000));
        let request = RatingRequest::new(product.id).with_coverage(dec!(300000));

        let result = rate(&product, &request);

        assert_eq!(result.breakdown.get(labels::COVERAGE_AMOUNT), Some(dec!(1000)));
        assert_eq!(result.premium_amount, dec!(6000.00));
    }
}

// ============================================================================
// HEALTH
// ============================================================================

mod health_tests {
    use super::*;

    /// 50-year-old smoker with a family of three
    #[test]
    fn test_age_family_smoker() {
        let product = product(ProductType::Health, dec!(8000));
        let request = RatingRequest::new(product.id)
            .with_age(50)
            .with_health(HealthDetails {
                family_size: Some(3),
                smoker: Some(true),
                ..Default::default()
            });

        let result = rate(&product, &request);

        assert_eq!(result.premium_amount.to_string(), "14400.00");
        assert_eq!(
            breakdown_pairs(&result),
            pairs(&[
                (labels::BASE_PREMIUM, dec!(8000)),
                (labels::AGE_FACTOR, dec!(6400)),
                (labels::FAMILY_DISCOUNT, dec!(-2880)),
                (labels::SMOKER_SURCHARGE, dec!(2880)),
            ])
        );
    }

    /// Over 60 uses the senior label and only that band
    #[test]
    fn test_senior_age_band() {
        let product = product(ProductType::Health, dec!(15000));
        let request = RatingRequest::new(product.id).with_age(61);

        let result = rate(&product, &request);

        assert_eq!(result.breakdown.get(labels::SENIOR_AGE_FACTOR), Some(dec!(22500)));
        assert_eq!(result.breakdown.get(labels::AGE_FACTOR), None);
        assert_eq!(result.premium_amount, dec!(37500.00));
    }

    /// Each pre-existing condition adds 40% of the running premium
    #[test]
    fn test_pre_existing_conditions_scale_with_count() {
        let product = product(ProductType::Health, dec!(8000));
        let request = RatingRequest::new(product.id).with_health(HealthDetails {
            pre_existing_conditions: vec!["Diabetes".to_string(), "Hypertension".to_string()],
            ..Default::default()
        });

        let result = rate(&product, &request);

        assert_eq!(result.breakdown.get(labels::PRE_EXISTING_CONDITIONS), Some(dec!(6400)));
        assert_eq!(result.premium_amount, dec!(14400.00));
    }

    /// Additional Coverage suppresses the generic coverage rule
    #[test]
    fn test_additional_coverage_suppresses_fallback() {
        let product = product(ProductType::Health, dec!(8000));
        let request = RatingRequest::new(product.id)
            .with_age(25)
            .with_coverage(dec!(500000));

        let result = rate(&product, &request);

        assert_eq!(result.breakdown.get(labels::ADDITIONAL_COVERAGE), Some(dec!(3600)));
        assert_eq!(result.breakdown.get(labels::COVERAGE_AMOUNT), None);
        assert_eq!(result.premium_amount, dec!(11600.00));
    }

    /// Coverage at the 200,000 threshold falls through to the generic rule
    #[test]
    fn test_threshold_coverage_uses_fallback() {
        let product = product(ProductType::Health, dec!(8000));
        let request = RatingRequest::new(product.id).with_coverage(dec!(200000));

        let result = rate(&product, &request);

        assert_eq!(result.breakdown.get(labels::ADDITIONAL_COVERAGE), None);
        assert_eq!(result.breakdown.get(labels::COVERAGE_AMOUNT), Some(dec!(800)));
        assert_eq!(result.premium_amount, dec!(8800.00));
    }

    /// Without an age no age band fires
    #[test]
    fn test_absent_age_skips_bands() {
        let product = product(ProductType::Health, dec!(8000));
        let result = rate(&product, &RatingRequest::new(product.id));

        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.premium_amount, dec!(8000.00));
    }
}

// ============================================================================
// LIFE
// ============================================================================

mod life_tests {
    use super::*;

    /// Age zero still records a zero Age Factor entry
    #[test]
    fn test_zero_age_records_zero_entry() {
        let product = product(ProductType::Life, dec!(10000));
        let request = RatingRequest::new(product.id).with_age(0);

        let result = rate(&product, &request);

        assert_eq!(result.premium_amount, dec!(10000.00));
        assert_eq!(
            breakdown_pairs(&result),
            pairs(&[(labels::BASE_PREMIUM, dec!(10000)), (labels::AGE_FACTOR, dec!(0))])
        );
        let json = serde_json::to_value(&result.breakdown).unwrap();
        assert_eq!(json["Age Factor"], 0.0);
    }

    /// An absent age behaves like age zero
    #[test]
    fn test_absent_age_treated_as_zero() {
        let product = product(ProductType::Life, dec!(10000));
        let absent = rate(&product, &RatingRequest::new(product.id));
        let zero = rate(&product, &RatingRequest::new(product.id).with_age(0));

        assert_eq!(absent, zero);
    }

    /// Every life rule plus the generic coverage rule
    #[test]
    fn test_full_life_chain() {
        let product = product(ProductType::Life, dec!(10000));
        let request = RatingRequest::new(product.id)
            .with_age(30)
            .with_coverage(dec!(300000))
            .with_life(LifeDetails {
                sum_assured: Some(dec!(5000000)),
                policy_term: Some(20),
                smoker: Some(true),
                occupation: Some(OccupationRisk::High),
            });

        let result = rate(&product, &request);

        assert_eq!(
            breakdown_pairs(&result),
            pairs(&[
                (labels::BASE_PREMIUM, dec!(10000)),
                (labels::AGE_FACTOR, dec!(6000)),
                (labels::SUM_ASSURED, dec!(5000)),
                (labels::TERM_DISCOUNT, dec!(-4200)),
                (labels::SMOKER_SURCHARGE, dec!(8400)),
                (labels::OCCUPATION_RISK, dec!(12600)),
                (labels::COVERAGE_AMOUNT, dec!(7560)),
            ])
        );
        assert_eq!(result.premium_amount, dec!(45360.00));
    }

    /// Zero-valued numeric inputs behave as absent
    #[test]
    fn test_zero_inputs_do_not_fire() {
        let product = product(ProductType::Life, dec!(10000));
        let request = RatingRequest::new(product.id)
            .with_age(10)
            .with_coverage(dec!(0))
            .with_life(LifeDetails {
                sum_assured: Some(dec!(0)),
                policy_term: Some(0),
                ..Default::default()
            });

        let result = rate(&product, &request);

        assert_eq!(result.breakdown.labels(), vec![labels::BASE_PREMIUM, labels::AGE_FACTOR]);
        assert_eq!(result.coverage_amount, product.coverage_max);
    }
}

// ============================================================================
// FALLBACK AND UNKNOWN TYPES
// ============================================================================

mod fallback_tests {
    use super::*;

    /// Unknown product types get only the base premium and the coverage rule
    #[test]
    fn test_unknown_type_pass_through() {
        let product = product(ProductType::from("TRAVEL"), dec!(2000));
        let request = RatingRequest::new(product.id)
            .with_age(20)
            .with_coverage(dec!(250000))
            .with_vehicle(VehicleDetails {
                vehicle_type: Some(VehicleType::Luxury),
                ..Default::default()
            });

        let result = rate(&product, &request);

        assert_eq!(
            breakdown_pairs(&result),
            pairs(&[(labels::BASE_PREMIUM, dec!(2000)), (labels::COVERAGE_AMOUNT, dec!(300))])
        );
        assert_eq!(result.premium_amount, dec!(2300.00));
        assert_eq!(result.product_type.code(), "TRAVEL");
    }

    /// Amounts beyond the range of `Decimal` saturate instead of failing
    #[test]
    fn test_extreme_inputs_saturate() {
        let product = product(ProductType::Life, dec!(10000));
        let request = RatingRequest::new(product.id)
            .with_age(10000)
            .with_coverage(dec!(70000000000000000000000000000));

        let result = rate(&product, &request);

        assert_eq!(result.premium_amount, Decimal::MAX);
        assert_eq!(result.breakdown.get(labels::AGE_FACTOR), Some(dec!(2000000.00)));
        assert_eq!(result.breakdown.get(labels::COVERAGE_AMOUNT), Some(Decimal::MAX));
        assert_eq!(result.coverage_amount, dec!(70000000000000000000000000000));
        assert!(serde_json::to_string(&result).is_ok());
    }

    /// Result JSON uses camelCase keys and numeric amounts
    #[test]
    fn test_result_wire_shape() {
        let product = product(ProductType::Vehicle, dec!(5000));
        let result = rate(&product, &RatingRequest::new(product.id).with_age(30));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["productType"], "VEHICLE");
        assert_eq!(json["premiumAmount"], 5000.0);
        assert_eq!(json["breakdown"]["Base Premium"], 5000.0);
        assert_eq!(json["coverageAmount"], 5000000.0);
        assert!(json.get("productName").is_some());
    }
}

// ============================================================================
// ROUNDING
// ============================================================================

mod rounding_tests {
    use super::*;

    /// Independent rounding leaves the breakdown a cent short of the premium
    #[test]
    fn test_breakdown_rounding_discrepancy() {
        let product = product(ProductType::Health, dec!(10.01));
        let request = RatingRequest::new(product.id)
            .with_age(35)
            .with_health(HealthDetails {
                smoker: Some(true),
                ..Default::default()
            });

        let result = rate(&product, &request);

        // 10.01 -> 13.013 -> 16.26625
        assert_eq!(result.premium_amount, dec!(16.27));
        assert_eq!(result.breakdown.get(labels::AGE_FACTOR), Some(dec!(3.00)));
        assert_eq!(result.breakdown.get(labels::SMOKER_SURCHARGE), Some(dec!(3.25)));
        assert_eq!(result.breakdown.total(), dec!(16.26));
        assert_eq!(result.rounding_discrepancy(), dec!(0.01));
        assert!(result.breakdown.iter().all(|e| e.amount.scale() == 2));
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn cents() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    fn product_type() -> impl Strategy<Value = ProductType> {
        prop_oneof![
            Just(ProductType::Vehicle),
            Just(ProductType::Health),
            Just(ProductType::Life),
            "[A-Z]{3,10}".prop_map(ProductType::from),
        ]
    }

    proptest! {
        /// Same inputs, byte-identical output
        #[test]
        fn prop_rate_is_idempotent(
            base in cents(),
            product_type in product_type(),
            age in proptest::option::of(0i32..100),
            coverage in proptest::option::of(0i64..20_000_000),
            smoker in any::<bool>(),
        ) {
            let product = product(product_type, base);
            let mut request = RatingRequest::new(product.id).with_health(HealthDetails {
                smoker: Some(smoker),
                ..Default::default()
            });
            request.age = age;
            request.coverage_amount = coverage.map(Decimal::from);

            let first = serde_json::to_string(&rate(&product, &request)).unwrap();
            let second = serde_json::to_string(&rate(&product, &request)).unwrap();
            prop_assert_eq!(first, second);
        }

        /// An empty request on a vehicle or health product returns the rounded base price
        #[test]
        fn prop_empty_request_is_base_price(
            base in cents(),
            health in any::<bool>(),
        ) {
            let product_type = if health { ProductType::Health } else { ProductType::Vehicle };
            let product = product(product_type, base);
            let result = rate(&product, &RatingRequest::new(product.id));

            prop_assert_eq!(result.premium_amount, base);
            prop_assert_eq!(result.breakdown.len(), 1);
        }

        /// Unknown product types ignore every line-specific detail
        #[test]
        fn prop_unknown_type_ignores_details(
            base in cents(),
            code in "[A-Z]{3,10}",
            age in 0i32..100,
        ) {
            prop_assume!(!matches!(code.as_str(), "VEHICLE" | "HEALTH" | "LIFE"));
            let product = product(ProductType::from(code.as_str()), base);
            let bare = RatingRequest::new(product.id);
            let detailed = RatingRequest::new(product.id)
                .with_age(age)
                .with_vehicle(VehicleDetails { vehicle_type: Some(VehicleType::Luxury), ..Default::default() })
                .with_health(HealthDetails { smoker: Some(true), ..Default::default() })
                .with_life(LifeDetails { smoker: Some(true), ..Default::default() });

            prop_assert_eq!(rate(&product, &bare), rate(&product, &detailed));
        }

        /// Premium and breakdown amounts always carry exactly two decimals
        #[test]
        fn prop_amounts_have_two_decimals(
            base in cents(),
            product_type in product_type(),
            age in 0i32..100,
        ) {
            let product = product(product_type, base);
            let result = rate(&product, &RatingRequest::new(product.id).with_age(age));

            prop_assert_eq!(result.premium_amount.scale(), 2);
            prop_assert!(result.breakdown.iter().all(|e| e.amount.scale() == 2));
        }
    }
}
