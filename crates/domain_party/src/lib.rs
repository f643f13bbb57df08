//! Party Domain
//!
//! KYC (Know Your Customer) document intake and verification for
//! policyholders.
//!
//! # Document Lifecycle
//!
//! ```text
//! submit -> Pending -> Verified
//!                  \-> Rejected (with reason)
//! ```
//!
//! A party counts as verified once any of its documents is verified.

pub mod error;
pub mod kyc;
pub mod ports;
pub mod services;

pub use error::PartyError;
pub use kyc::{
    DocumentType, KycDocument, KycStatus, KycStatusSummary, KycSubmission, ResolvedDecision,
    ValidSubmission, VerificationDecision,
};
pub use ports::KycRepository;
pub use services::KycService;
