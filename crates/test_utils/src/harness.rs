//! Service Harness
//!
//! Wires the rating, renewal, and KYC services to in-memory adapters and
//! keeps handles on the adapters so tests can inspect what happened.

use std::sync::Arc;

use core_kernel::audit::mock::InMemoryAuditLog;
use core_kernel::ports::mock::{HexEncodingCipher, RecordingNotifier};
use domain_party::ports::mock::InMemoryKycRepository;
use domain_party::{KycDocument, KycService};
use domain_policy::ports::mock::InMemoryPolicyRepository;
use domain_policy::{
    InMemoryProductCatalog, PolicyRecord, RatingService, RenewalConfig, RenewalService,
};

/// All services over shared in-memory adapters
pub struct TestPlatform {
    pub catalog: Arc<InMemoryProductCatalog>,
    pub policies: Arc<InMemoryPolicyRepository>,
    pub kyc_documents: Arc<InMemoryKycRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub audit: Arc<InMemoryAuditLog>,
    pub rating: RatingService,
    pub renewals: RenewalService,
    pub kyc: KycService,
}

impl TestPlatform {
    /// Seeded catalog, empty stores, default renewal settings
    pub async fn new() -> Self {
        Self::with_data(InMemoryProductCatalog::seeded(), vec![], vec![]).await
    }

    pub async fn with_data(
        catalog: InMemoryProductCatalog,
        policies: Vec<PolicyRecord>,
        documents: Vec<KycDocument>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let policies = Arc::new(InMemoryPolicyRepository::with_policies(policies).await);
        let kyc_documents = Arc::new(InMemoryKycRepository::with_documents(documents).await);
        let notifier = Arc::new(RecordingNotifier::new());
        let audit = Arc::new(InMemoryAuditLog::new());

        let rating = RatingService::new(catalog.clone());
        let renewals = RenewalService::new(
            policies.clone(),
            notifier.clone(),
            audit.clone(),
            RenewalConfig::default(),
        );
        let kyc = KycService::new(
            kyc_documents.clone(),
            Arc::new(HexEncodingCipher),
            audit.clone(),
        );

        Self {
            catalog,
            policies,
            kyc_documents,
            notifier,
            audit,
            rating,
            renewals,
            kyc,
        }
    }
}
