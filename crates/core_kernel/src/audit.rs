//! Audit trail
//!
//! Every state-changing operation in the domain services records an
//! [`AuditEvent`] through the [`AuditLog`] port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::{AuditEventId, PartyId};
use crate::ports::PortError;

/// Kinds of audited actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    KycUploaded,
    KycVerified,
    RenewalReminderSent,
    PolicyRenewed,
}

impl AuditAction {
    /// Returns the stored action code
    pub fn code(&self) -> &'static str {
        match self {
            AuditAction::KycUploaded => "KYC_UPLOADED",
            AuditAction::KycVerified => "KYC_VERIFIED",
            AuditAction::RenewalReminderSent => "RENEWAL_REMINDER_SENT",
            AuditAction::PolicyRenewed => "POLICY_RENEWED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single audit trail entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: AuditEventId,
    pub action: AuditAction,
    /// Party that performed the action, if known
    pub actor: Option<PartyId>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates a new audit event stamped with the current time
    pub fn new(action: AuditAction, actor: Option<PartyId>, details: impl Into<String>) -> Self {
        Self {
            id: AuditEventId::new_v7(),
            action,
            actor,
            entity_type: None,
            entity_id: None,
            details: details.into(),
            timestamp: Utc::now(),
        }
    }

    /// Attaches the entity the action applied to
    pub fn for_entity(mut self, entity_type: impl Into<String>, entity_id: impl fmt::Display) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.to_string());
        self
    }
}

/// Append-only audit trail
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Appends an event
    async fn record(&self, event: AuditEvent) -> Result<(), PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use tokio::sync::RwLock;

    /// Audit log kept in memory, in insertion order
    #[derive(Debug, Default)]
    pub struct InMemoryAuditLog {
        events: RwLock<Vec<AuditEvent>>,
    }

    impl InMemoryAuditLog {
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns all recorded events
        pub async fn events(&self) -> Vec<AuditEvent> {
            self.events.read().await.clone()
        }

        /// Returns the recorded events for one action
        pub async fn events_for(&self, action: AuditAction) -> Vec<AuditEvent> {
            self.events
                .read()
                .await
                .iter()
                .filter(|e| e.action == action)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl AuditLog for InMemoryAuditLog {
        async fn record(&self, event: AuditEvent) -> Result<(), PortError> {
            tracing::debug!(action = %event.action, details = %event.details, "audit event");
            self.events.write().await.push(event);
            Ok(())
        }
    }
}
