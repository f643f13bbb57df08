//! Policy domain errors
//!
//! This module defines all error types that can occur within the
//! policy administration domain.

use thiserror::Error;

use core_kernel::{PartyId, PolicyId, PortError, ProductId};

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// No product exists for the requested identifier
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product data failed catalog validation
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Policy not found
    #[error("Policy not found: {0}")]
    PolicyNotFound(PolicyId),

    /// The requesting party does not hold the policy
    #[error("Party {requester} is not the holder of policy {policy_id}")]
    NotPolicyholder {
        policy_id: PolicyId,
        requester: PartyId,
    },

    /// Invalid state transition attempted
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        from: String,
        to: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization of a domain document failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// External collaborator failed
    #[error("External service error: {0}")]
    Port(#[from] PortError),
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }

    /// Creates an invalid product error
    pub fn invalid_product(message: impl Into<String>) -> Self {
        PolicyError::InvalidProduct(message.into())
    }
}
