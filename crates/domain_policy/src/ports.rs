//! Storage port for policies and renewal reminders
//!
//! The renewal service reads and writes policies only through
//! [`PolicyRepository`], so any store can back it.

use async_trait::async_trait;

use core_kernel::{PolicyId, PortError};

use crate::policy::{PolicyRecord, PolicyStatus};
use crate::renewal::RenewalReminder;

/// Persistence for policies and reminder history
#[async_trait]
pub trait PolicyRepository: Send + Sync {
    /// Retrieves a policy by id, `None` if absent
    async fn find_by_id(&self, id: PolicyId) -> Result<Option<PolicyRecord>, PortError>;

    /// Lists every policy in the given status
    async fn list_by_status(&self, status: PolicyStatus) -> Result<Vec<PolicyRecord>, PortError>;

    /// Inserts or replaces a policy
    async fn save(&self, policy: &PolicyRecord) -> Result<(), PortError>;

    /// Appends a reminder to the history
    async fn record_reminder(&self, reminder: &RenewalReminder) -> Result<(), PortError>;
}

/// In-memory repository for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct InMemoryPolicyRepository {
        policies: RwLock<HashMap<PolicyId, PolicyRecord>>,
        reminders: RwLock<Vec<RenewalReminder>>,
    }

    impl InMemoryPolicyRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with policies for testing
        pub async fn with_policies(policies: Vec<PolicyRecord>) -> Self {
            let repository = Self::new();
            {
                let mut stored = repository.policies.write().await;
                for policy in policies {
                    stored.insert(policy.id, policy);
                }
            }
            repository
        }

        /// Returns every stored policy
        pub async fn policies(&self) -> Vec<PolicyRecord> {
            self.policies.read().await.values().cloned().collect()
        }

        /// Returns the recorded reminders in insertion order
        pub async fn reminders(&self) -> Vec<RenewalReminder> {
            self.reminders.read().await.clone()
        }
    }

    #[async_trait]
    impl PolicyRepository for InMemoryPolicyRepository {
        async fn find_by_id(&self, id: PolicyId) -> Result<Option<PolicyRecord>, PortError> {
            Ok(self.policies.read().await.get(&id).cloned())
        }

        async fn list_by_status(&self, status: PolicyStatus) -> Result<Vec<PolicyRecord>, PortError> {
            Ok(self
                .policies
                .read()
                .await
                .values()
                .filter(|p| p.status == status)
                .cloned()
                .collect())
        }

        async fn save(&self, policy: &PolicyRecord) -> Result<(), PortError> {
            self.policies.write().await.insert(policy.id, policy.clone());
            Ok(())
        }

        async fn record_reminder(&self, reminder: &RenewalReminder) -> Result<(), PortError> {
            let policies = self.policies.read().await;
            if !policies.contains_key(&reminder.policy_id) {
                return Err(PortError::not_found("Policy", reminder.policy_id));
            }
            self.reminders.write().await.push(reminder.clone());
            Ok(())
        }
    }
}
