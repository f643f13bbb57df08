//! Premium rating
//!
//! Combines a product's base price with an ordered chain of rating factors
//! for the product's line of business (vehicle, health, or life) and
//! produces the final premium with an itemised breakdown.
//!
//! ```text
//! base price ──► line rules (in order) ──► coverage fallback ──► round
//!                 premium += delta, breakdown[label] = delta
//! ```

pub mod breakdown;
pub mod engine;
pub mod request;
pub mod rules;
pub mod tables;

pub use breakdown::{Breakdown, BreakdownEntry};
pub use engine::{rate, RatingResult};
pub use request::{HealthDetails, LifeDetails, RatingRequest, VehicleDetails};
pub use rules::{labels, Adjustment, RatingContext, RatingState, Rule};
pub use tables::{CityTier, OccupationRisk, VehicleType};
