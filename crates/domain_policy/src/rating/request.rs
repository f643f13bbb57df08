//! Rating request
//!
//! A request carries the applicant's age, an optional coverage amount and
//! the detail block for each line of business. Only the block matching the
//! product's type is read. Every field inside a block is optional.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ProductId;

use super::tables::{CityTier, OccupationRisk, VehicleType};

/// Input to a premium quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    pub product_id: ProductId,
    /// Applicant age in years
    #[serde(default)]
    pub age: Option<i32>,
    /// Requested coverage; the product's maximum is quoted when absent
    #[serde(default)]
    pub coverage_amount: Option<Decimal>,
    #[serde(default)]
    pub vehicle_details: Option<VehicleDetails>,
    #[serde(default)]
    pub health_details: Option<HealthDetails>,
    #[serde(default)]
    pub life_details: Option<LifeDetails>,
}

impl RatingRequest {
    /// Creates a request with no applicant details
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            age: None,
            coverage_amount: None,
            vehicle_details: None,
            health_details: None,
            life_details: None,
        }
    }

    /// Sets the applicant age
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the requested coverage amount
    pub fn with_coverage(mut self, coverage_amount: Decimal) -> Self {
        self.coverage_amount = Some(coverage_amount);
        self
    }

    /// Attaches vehicle details
    pub fn with_vehicle(mut self, details: VehicleDetails) -> Self {
        self.vehicle_details = Some(details);
        self
    }

    /// Attaches health details
    pub fn with_health(mut self, details: HealthDetails) -> Self {
        self.health_details = Some(details);
        self
    }

    /// Attaches life details
    pub fn with_life(mut self, details: LifeDetails) -> Self {
        self.life_details = Some(details);
        self
    }
}

/// Vehicle line inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    #[serde(default)]
    pub vehicle_type: Option<VehicleType>,
    /// Vehicle age in years, fractional values allowed
    #[serde(default)]
    pub vehicle_age: Option<Decimal>,
    /// Insured Declared Value
    #[serde(default)]
    pub idv: Option<Decimal>,
    #[serde(default)]
    pub city: Option<CityTier>,
}

/// Health line inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDetails {
    #[serde(default)]
    pub pre_existing_conditions: Vec<String>,
    #[serde(default)]
    pub family_size: Option<i32>,
    #[serde(default)]
    pub smoker: Option<bool>,
}

/// Life line inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeDetails {
    #[serde(default)]
    pub sum_assured: Option<Decimal>,
    /// Policy term in years
    #[serde(default)]
    pub policy_term: Option<i32>,
    #[serde(default)]
    pub smoker: Option<bool>,
    #[serde(default)]
    pub occupation: Option<OccupationRisk>,
}
