//! Core Kernel - Foundational types and utilities for the policy administration system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers
//! - Decimal rounding with the platform's display semantics
//! - Port traits for the external collaborators (notifier, cipher, audit log)
//! - Audit events

pub mod identifiers;
pub mod rounding;
pub mod ports;
pub mod audit;

pub use identifiers::{
    PolicyId, PartyId, ProductId, KycDocumentId, ReminderId, AuditEventId,
};
pub use rounding::{round_half_up, round_currency};
pub use ports::{PortError, Notifier, EmailMessage, SmsMessage, DeliveryReceipt, Cipher};
pub use audit::{AuditAction, AuditEvent, AuditLog};
#[cfg(any(test, feature = "mock"))]
pub use audit::mock::InMemoryAuditLog;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{RecordingNotifier, HexEncodingCipher};
