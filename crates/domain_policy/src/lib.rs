//! Policy Administration Domain
//!
//! Product catalog, premium rating, policy records, renewal reminders, and
//! certificate data for the insurance backend.
//!
//! # Quote to policy
//!
//! ```text
//! RatingRequest ──► RatingService::quote ──► RatingResult
//!                                               │
//!                    PolicyRecord::from_quote ◄─┘
//!                    PendingPayment -> Active -> (renew) -> PendingPayment
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{InMemoryProductCatalog, RatingRequest, RatingService};
//!
//! let service = RatingService::new(Arc::new(InMemoryProductCatalog::seeded()));
//! let quote = service.quote(&RatingRequest::new(product_id).with_age(30))?;
//! println!("{}", quote.premium_amount);
//! ```

pub mod certificate;
pub mod error;
pub mod policy;
pub mod ports;
pub mod product;
pub mod rating;
pub mod renewal;
pub mod services;

pub use certificate::{
    issue_certificate, CertificateRenderer, IssuedCertificate, PolicyCertificate,
    VerificationPayload,
};
pub use error::PolicyError;
pub use policy::{PolicyHolder, PolicyRecord, PolicyStatus};
pub use ports::PolicyRepository;
pub use product::{InMemoryProductCatalog, Product, ProductCatalog, ProductType};
pub use rating::{
    rate, Breakdown, BreakdownEntry, CityTier, HealthDetails, LifeDetails, OccupationRisk,
    RatingRequest, RatingResult, VehicleDetails, VehicleType,
};
pub use renewal::{
    ReminderMethod, ReminderSummary, RenewalConfig, RenewalOutcome, RenewalReminder,
    RenewalService,
};
pub use services::RatingService;
