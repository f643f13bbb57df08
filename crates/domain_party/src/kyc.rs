//! KYC (Know Your Customer) documents
//!
//! A party submits identity documents; a verifier later marks each one
//! verified or rejected. Document numbers are stored encrypted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use core_kernel::{KycDocumentId, PartyId};

use crate::error::PartyError;

/// Identity documents accepted for KYC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Aadhar,
    Pan,
    License,
    Passport,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Aadhar,
        DocumentType::Pan,
        DocumentType::License,
        DocumentType::Passport,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::Aadhar => "AADHAR",
            DocumentType::Pan => "PAN",
            DocumentType::License => "LICENSE",
            DocumentType::Passport => "PASSPORT",
        }
    }
}

impl FromStr for DocumentType {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| PartyError::InvalidDocumentType(s.to_string()))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// KYC status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            KycStatus::Pending => "PENDING",
            KycStatus::Verified => "VERIFIED",
            KycStatus::Rejected => "REJECTED",
        };
        f.write_str(code)
    }
}

/// A submitted KYC document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycDocument {
    pub id: KycDocumentId,
    pub party_id: PartyId,
    pub document_type: DocumentType,
    /// Cipher text of the document number
    pub document_number: String,
    /// Where the uploaded scan is stored
    pub file_reference: String,
    pub status: KycStatus,
    pub verified_by: Option<PartyId>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl KycDocument {
    /// Creates a pending document
    pub fn new(
        party_id: PartyId,
        document_type: DocumentType,
        encrypted_number: impl Into<String>,
        file_reference: impl Into<String>,
    ) -> Self {
        Self {
            id: KycDocumentId::new_v7(),
            party_id,
            document_type,
            document_number: encrypted_number.into(),
            file_reference: file_reference.into(),
            status: KycStatus::Pending,
            verified_by: None,
            verified_at: None,
            rejection_reason: None,
            created_at: Utc::now(),
        }
    }

    /// Records a verifier's decision
    ///
    /// A later decision replaces an earlier one.
    pub fn apply_decision(&mut self, verifier: PartyId, decision: &ResolvedDecision) {
        self.status = decision.status;
        self.rejection_reason = decision.rejection_reason.clone();
        self.verified_by = Some(verifier);
        self.verified_at = Some(Utc::now());
    }

    pub fn is_verified(&self) -> bool {
        self.status == KycStatus::Verified
    }
}

/// Incoming document submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmission {
    /// Upper-case document type code, checked when parsed
    pub document_type: String,
    #[validate(length(min = 1, max = 100, message = "document number must be 1 to 100 characters"))]
    pub document_number: String,
    /// Reference to the uploaded scan
    #[serde(default)]
    pub file_reference: Option<String>,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub document_type: DocumentType,
    pub document_number: String,
    pub file_reference: String,
}

impl KycSubmission {
    pub fn new(
        document_type: impl Into<String>,
        document_number: impl Into<String>,
        file_reference: Option<String>,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            document_number: document_number.into(),
            file_reference,
        }
    }

    /// Validates the submission
    ///
    /// # Errors
    ///
    /// - `DocumentFileRequired` if no file was attached
    /// - `InvalidData` if a field fails validation
    /// - `InvalidDocumentType` for an unrecognised type code
    pub fn validated(self) -> Result<ValidSubmission, PartyError> {
        let file_reference = self
            .file_reference
            .clone()
            .filter(|f| !f.trim().is_empty())
            .ok_or(PartyError::DocumentFileRequired)?;

        self.validate()?;
        let document_type = self.document_type.parse()?;

        Ok(ValidSubmission {
            document_type,
            document_number: self.document_number,
            file_reference,
        })
    }
}

/// A verifier's decision as received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDecision {
    pub status: String,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// A checked decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDecision {
    pub status: KycStatus,
    pub rejection_reason: Option<String>,
}

impl VerificationDecision {
    pub fn verified() -> Self {
        Self {
            status: KycStatus::Verified.to_string(),
            rejection_reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            status: KycStatus::Rejected.to_string(),
            rejection_reason: Some(reason.into()),
        }
    }

    /// Checks the decision
    ///
    /// # Errors
    ///
    /// `InvalidVerificationStatus` unless the status is VERIFIED or REJECTED;
    /// `RejectionReasonRequired` for a rejection without a reason
    pub fn resolve(&self) -> Result<ResolvedDecision, PartyError> {
        match self.status.as_str() {
            "VERIFIED" => Ok(ResolvedDecision {
                status: KycStatus::Verified,
                rejection_reason: None,
            }),
            "REJECTED" => {
                let reason = self
                    .rejection_reason
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or(PartyError::RejectionReasonRequired)?;
                Ok(ResolvedDecision {
                    status: KycStatus::Rejected,
                    rejection_reason: Some(reason.to_string()),
                })
            }
            other => Err(PartyError::InvalidVerificationStatus(other.to_string())),
        }
    }
}

/// KYC standing of a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycStatusSummary {
    /// True once any document has been verified
    pub verified: bool,
    pub documents: Vec<KycDocument>,
}

impl KycStatusSummary {
    pub fn from_documents(documents: Vec<KycDocument>) -> Self {
        Self {
            verified: documents.iter().any(KycDocument::is_verified),
            documents,
        }
    }
}
