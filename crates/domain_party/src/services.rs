//! KYC workflow service

use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{AuditAction, AuditEvent, AuditLog, Cipher, KycDocumentId, PartyId};

use crate::error::PartyError;
use crate::kyc::{KycDocument, KycStatus, KycStatusSummary, KycSubmission, VerificationDecision};
use crate::ports::KycRepository;

/// Submission, review, and verification of KYC documents
#[derive(Clone)]
pub struct KycService {
    repository: Arc<dyn KycRepository>,
    cipher: Arc<dyn Cipher>,
    audit: Arc<dyn AuditLog>,
}

impl KycService {
    pub fn new(
        repository: Arc<dyn KycRepository>,
        cipher: Arc<dyn Cipher>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            repository,
            cipher,
            audit,
        }
    }

    /// Validates and stores a submission as a pending document
    ///
    /// The document number is encrypted before it is stored.
    pub async fn submit(
        &self,
        party_id: PartyId,
        submission: KycSubmission,
    ) -> Result<KycDocument, PartyError> {
        let submission = submission.validated()?;
        let encrypted = self.cipher.encrypt(&submission.document_number)?;

        let document = KycDocument::new(
            party_id,
            submission.document_type,
            encrypted,
            submission.file_reference,
        );
        self.repository.insert(&document).await?;

        self.audit
            .record(
                AuditEvent::new(
                    AuditAction::KycUploaded,
                    Some(party_id),
                    format!("KYC document uploaded: {}", document.document_type),
                )
                .for_entity("KYC_DOCUMENT", document.id),
            )
            .await?;

        info!(
            party_id = %party_id,
            document_id = %document.id,
            document_type = %document.document_type,
            "KYC document submitted"
        );
        Ok(document)
    }

    /// A party's documents, newest first
    pub async fn documents_for(&self, party_id: PartyId) -> Result<Vec<KycDocument>, PartyError> {
        let mut documents = self.repository.list_for_party(party_id).await?;
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(documents)
    }

    /// Whether a party is verified, with its documents newest first
    pub async fn status_for(&self, party_id: PartyId) -> Result<KycStatusSummary, PartyError> {
        Ok(KycStatusSummary::from_documents(self.documents_for(party_id).await?))
    }

    /// Documents awaiting review, oldest first
    pub async fn pending(&self) -> Result<Vec<KycDocument>, PartyError> {
        let mut documents = self.repository.list_by_status(KycStatus::Pending).await?;
        documents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(documents)
    }

    /// Records a verifier's decision on a document
    ///
    /// # Errors
    ///
    /// Decision errors are reported before the document is looked up;
    /// `KycDocumentNotFound` if the document does not exist
    pub async fn verify(
        &self,
        document_id: KycDocumentId,
        verifier: PartyId,
        decision: &VerificationDecision,
    ) -> Result<KycDocument, PartyError> {
        let decision = decision.resolve()?;

        let Some(mut document) = self.repository.find_by_id(document_id).await? else {
            warn!(document_id = %document_id, "KYC document not found for verification");
            return Err(PartyError::KycDocumentNotFound(document_id));
        };

        document.apply_decision(verifier, &decision);
        self.repository.update(&document).await?;

        self.audit
            .record(
                AuditEvent::new(
                    AuditAction::KycVerified,
                    Some(verifier),
                    format!("KYC document {}: {}", document.status, document.id),
                )
                .for_entity("KYC_DOCUMENT", document.id),
            )
            .await?;

        info!(
            document_id = %document.id,
            party_id = %document.party_id,
            status = %document.status,
            "KYC decision recorded"
        );
        Ok(document)
    }

    /// Decrypts a stored document number
    pub fn reveal_document_number(&self, document: &KycDocument) -> Result<String, PartyError> {
        Ok(self.cipher.decrypt(&document.document_number)?)
    }
}
