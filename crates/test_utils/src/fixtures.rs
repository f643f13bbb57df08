//! Pre-built Test Fixtures
//!
//! Ready-to-use products, parties, dates, and requests. Values are fixed so
//! tests can assert exact premiums.

use chrono::NaiveDate;
use core_kernel::{PartyId, ProductId};
use domain_policy::product::seed;
use domain_policy::{
    HealthDetails, PolicyHolder, Product, ProductType, RatingRequest, VehicleDetails, VehicleType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for product test data
pub struct ProductFixtures;

impl ProductFixtures {
    /// Seeded comprehensive car product id (base 5000)
    pub fn car_id() -> ProductId {
        seed::COMPREHENSIVE_CAR
    }

    /// Seeded family health product id (base 8000)
    pub fn family_health_id() -> ProductId {
        seed::FAMILY_HEALTH_SHIELD
    }

    /// Seeded term life product id (base 10000)
    pub fn term_life_id() -> ProductId {
        seed::TERM_LIFE
    }

    /// A product of any type with the given base price
    pub fn with_base(product_type: ProductType, base_price: Decimal) -> Product {
        Product::new(
            ProductId::new(),
            format!("{} Test Product", product_type.code()),
            product_type,
            base_price,
            dec!(100000),
            dec!(5000000),
        )
    }

    /// A product whose type code no line of business handles
    pub fn unknown_type() -> Product {
        Self::with_base(ProductType::from("TRAVEL"), dec!(2000))
    }
}

/// Fixture for party test data
pub struct PartyFixtures;

impl PartyFixtures {
    /// Stable party id for the standard policyholder
    pub fn holder_id() -> PartyId {
        PartyId::from_u128(0x1001)
    }

    /// Stable party id for the KYC verifier
    pub fn verifier_id() -> PartyId {
        PartyId::from_u128(0x2001)
    }

    /// Policyholder reachable by e-mail and SMS
    pub fn holder() -> PolicyHolder {
        PolicyHolder {
            party_id: Self::holder_id(),
            name: "Priya Sharma".to_string(),
            email: Some("priya.sharma@example.com".to_string()),
            phone: Some("+91-9876543210".to_string()),
        }
    }
}

/// Fixture for date test data
pub struct DateFixtures;

impl DateFixtures {
    /// Standard policy start date (Jan 1, 2026)
    pub fn policy_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    /// Three weeks before the standard policy ends
    pub fn reminder_run() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 11).unwrap()
    }

    /// Well before the reminder window opens
    pub fn mid_term() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }
}

/// Fixture for rating requests
pub struct RequestFixtures;

impl RequestFixtures {
    /// 30-year-old insuring an SUV: 7500.00 on the seeded car
    pub fn suv() -> RatingRequest {
        RatingRequest::new(ProductFixtures::car_id())
            .with_age(30)
            .with_vehicle(VehicleDetails {
                vehicle_type: Some(VehicleType::Suv),
                ..Default::default()
            })
    }

    /// 50-year-old smoker with a family of three: 14400.00 on the seeded health plan
    pub fn family_smoker() -> RatingRequest {
        RatingRequest::new(ProductFixtures::family_health_id())
            .with_age(50)
            .with_health(HealthDetails {
                family_size: Some(3),
                smoker: Some(true),
                ..Default::default()
            })
    }

    /// 35-year-old on term life: 17000.00 on the seeded product
    pub fn term_life() -> RatingRequest {
        RatingRequest::new(ProductFixtures::term_life_id()).with_age(35)
    }
}
