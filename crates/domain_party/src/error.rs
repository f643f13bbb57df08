//! Party domain errors

use thiserror::Error;

use core_kernel::{KycDocumentId, PortError};

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// Document type code is not one of the accepted identity documents
    #[error("Invalid document type: {0}")]
    InvalidDocumentType(String),

    /// A submission arrived without the scanned document
    #[error("Document file is required")]
    DocumentFileRequired,

    /// Verification decisions must be VERIFIED or REJECTED
    #[error("Invalid verification status: {0}")]
    InvalidVerificationStatus(String),

    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    #[error("KYC document not found: {0}")]
    KycDocumentNotFound(KycDocumentId),

    /// Invalid party data provided
    #[error("Invalid party data: {0}")]
    InvalidData(String),

    /// Storage, cipher, or audit adapter failure
    #[error("External service error: {0}")]
    Port(#[from] PortError),
}

impl PartyError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidData(message.into())
    }
}

impl From<validator::ValidationErrors> for PartyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        messages.sort();
        PartyError::InvalidData(messages.join("; "))
    }
}
