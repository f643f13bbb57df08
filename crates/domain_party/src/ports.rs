//! Port definitions for the party domain
//!
//! KYC documents are read and written through [`KycRepository`], keeping the
//! domain independent of the store behind it.

use async_trait::async_trait;

use core_kernel::{KycDocumentId, PartyId, PortError};

use crate::kyc::{KycDocument, KycStatus};

/// Persistence for KYC documents
#[async_trait]
pub trait KycRepository: Send + Sync {
    /// Stores a new document
    ///
    /// Returns `PortError::Conflict` if the id is already taken
    async fn insert(&self, document: &KycDocument) -> Result<(), PortError>;

    /// Replaces an existing document
    ///
    /// Returns `PortError::NotFound` if it does not exist
    async fn update(&self, document: &KycDocument) -> Result<(), PortError>;

    async fn find_by_id(&self, id: KycDocumentId) -> Result<Option<KycDocument>, PortError>;

    /// All documents a party has submitted, in any order
    async fn list_for_party(&self, party_id: PartyId) -> Result<Vec<KycDocument>, PortError>;

    /// All documents in the given status, in any order
    async fn list_by_status(&self, status: KycStatus) -> Result<Vec<KycDocument>, PortError>;
}

/// Mock implementation of KycRepository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// In-memory KYC document store
    #[derive(Debug, Default)]
    pub struct InMemoryKycRepository {
        documents: RwLock<HashMap<KycDocumentId, KycDocument>>,
    }

    impl InMemoryKycRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with documents for testing
        pub async fn with_documents(documents: Vec<KycDocument>) -> Self {
            let repository = Self::new();
            {
                let mut stored = repository.documents.write().await;
                for document in documents {
                    stored.insert(document.id, document);
                }
            }
            repository
        }
    }

    #[async_trait]
    impl KycRepository for InMemoryKycRepository {
        async fn insert(&self, document: &KycDocument) -> Result<(), PortError> {
            let mut documents = self.documents.write().await;
            if documents.contains_key(&document.id) {
                return Err(PortError::conflict(format!("KYC document {} already exists", document.id)));
            }
            documents.insert(document.id, document.clone());
            Ok(())
        }

        async fn update(&self, document: &KycDocument) -> Result<(), PortError> {
            let mut documents = self.documents.write().await;
            let stored = documents
                .get_mut(&document.id)
                .ok_or_else(|| PortError::not_found("KycDocument", document.id))?;
            *stored = document.clone();
            Ok(())
        }

        async fn find_by_id(&self, id: KycDocumentId) -> Result<Option<KycDocument>, PortError> {
            Ok(self.documents.read().await.get(&id).cloned())
        }

        async fn list_for_party(&self, party_id: PartyId) -> Result<Vec<KycDocument>, PortError> {
            Ok(self
                .documents
                .read()
                .await
                .values()
                .filter(|d| d.party_id == party_id)
                .cloned()
                .collect())
        }

        async fn list_by_status(&self, status: KycStatus) -> Result<Vec<KycDocument>, PortError> {
            Ok(self
                .documents
                .read()
                .await
                .values()
                .filter(|d| d.status == status)
                .cloned()
                .collect())
        }
    }
}
