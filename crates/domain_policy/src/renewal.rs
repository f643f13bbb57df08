//! Renewal reminders and policy renewal
//!
//! [`RenewalService`] finds active policies close to their end date, sends
//! each holder an e-mail and SMS reminder once, and turns a renewal request
//! into a fresh pending policy.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{
    AuditAction, AuditEvent, AuditLog, EmailMessage, Notifier, PartyId, PolicyId, ReminderId,
    SmsMessage,
};

use crate::error::PolicyError;
use crate::policy::{PolicyRecord, PolicyStatus};
use crate::ports::PolicyRepository;

/// Renewal settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenewalConfig {
    /// Days before the end date at which a policy becomes due for a reminder
    pub window_days: i64,
    /// Base of the renewal link; the policy id is appended
    pub renewal_base_url: String,
}

impl Default for RenewalConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            renewal_base_url: "http://localhost:3000/renew".to_string(),
        }
    }
}

impl RenewalConfig {
    /// Renewal link for a policy
    pub fn renewal_link(&self, policy_id: PolicyId) -> String {
        format!("{}/{}", self.renewal_base_url.trim_end_matches('/'), policy_id)
    }
}

/// Channels a reminder went out on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderMethod {
    Email,
    Sms,
    EmailSms,
}

/// A reminder sent for a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalReminder {
    pub id: ReminderId,
    pub policy_id: PolicyId,
    pub reminder_date: NaiveDate,
    pub method: ReminderMethod,
    pub sent: bool,
    pub sent_at: DateTime<Utc>,
}

/// Result of a reminder run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSummary {
    pub count: usize,
    pub policy_ids: Vec<PolicyId>,
}

/// Result of a renewal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewalOutcome {
    pub old_policy_id: PolicyId,
    pub new_policy: PolicyRecord,
}

/// Reminder and renewal workflows over the policy store
#[derive(Clone)]
pub struct RenewalService {
    repository: Arc<dyn PolicyRepository>,
    notifier: Arc<dyn Notifier>,
    audit: Arc<dyn AuditLog>,
    config: RenewalConfig,
}

impl RenewalService {
    pub fn new(
        repository: Arc<dyn PolicyRepository>,
        notifier: Arc<dyn Notifier>,
        audit: Arc<dyn AuditLog>,
        config: RenewalConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            audit,
            config,
        }
    }

    pub fn config(&self) -> &RenewalConfig {
        &self.config
    }

    /// Active policies due for a reminder as of `as_of`, earliest end date first
    pub async fn expiring_policies(&self, as_of: NaiveDate) -> Result<Vec<PolicyRecord>, PolicyError> {
        let mut due: Vec<PolicyRecord> = self
            .repository
            .list_by_status(PolicyStatus::Active)
            .await?
            .into_iter()
            .filter(|p| p.is_due_for_reminder(as_of, self.config.window_days))
            .collect();
        due.sort_by_key(|p| (p.end_date, p.id));
        Ok(due)
    }

    /// Sends one reminder to the holder of each due policy
    ///
    /// A notifier failure aborts the run; policies reminded before the
    /// failure stay marked.
    pub async fn send_reminders(&self, as_of: NaiveDate) -> Result<ReminderSummary, PolicyError> {
        let mut summary = ReminderSummary::default();

        for mut policy in self.expiring_policies(as_of).await? {
            let Some(method) = self.notify_holder(&policy).await? else {
                warn!(policy_id = %policy.id, "Policyholder has no contact details, reminder skipped");
                continue;
            };

            policy.renewal_reminder_sent = true;
            self.repository.save(&policy).await?;

            let reminder = RenewalReminder {
                id: ReminderId::new_v7(),
                policy_id: policy.id,
                reminder_date: as_of,
                method,
                sent: true,
                sent_at: Utc::now(),
            };
            self.repository.record_reminder(&reminder).await?;

            self.audit
                .record(
                    AuditEvent::new(
                        AuditAction::RenewalReminderSent,
                        Some(policy.holder.party_id),
                        format!("Renewal reminder sent for policy {}", policy.display_number()),
                    )
                    .for_entity("POLICY", policy.id),
                )
                .await?;

            summary.count += 1;
            summary.policy_ids.push(policy.id);
        }

        info!(count = summary.count, as_of = %as_of, "Renewal reminders sent");
        Ok(summary)
    }

    async fn notify_holder(&self, policy: &PolicyRecord) -> Result<Option<ReminderMethod>, PolicyError> {
        let number = policy.display_number();
        let link = self.config.renewal_link(policy.id);

        if let Some(email) = &policy.holder.email {
            self.notifier
                .send_email(EmailMessage {
                    to: email.clone(),
                    subject: format!("Policy Renewal Reminder - {number}"),
                    body: format!(
                        "Dear {}, your policy {number} expires on {}. \
                         Renew now to continue your coverage without interruption: {link}",
                        policy.holder.name, policy.end_date
                    ),
                })
                .await?;
        }

        if let Some(phone) = &policy.holder.phone {
            self.notifier
                .send_sms(SmsMessage {
                    to: phone.clone(),
                    body: format!(
                        "Your policy {number} expires on {}. Renew now: {link}",
                        policy.end_date
                    ),
                })
                .await?;
        }

        Ok(match (&policy.holder.email, &policy.holder.phone) {
            (Some(_), Some(_)) => Some(ReminderMethod::EmailSms),
            (Some(_), None) => Some(ReminderMethod::Email),
            (None, Some(_)) => Some(ReminderMethod::Sms),
            (None, None) => None,
        })
    }

    /// Renews a policy on behalf of its holder
    ///
    /// # Errors
    ///
    /// `PolicyNotFound` if the policy does not exist, `NotPolicyholder` if
    /// the requester does not hold it
    pub async fn renew(&self, policy_id: PolicyId, requester: PartyId) -> Result<RenewalOutcome, PolicyError> {
        let policy = self
            .repository
            .find_by_id(policy_id)
            .await?
            .ok_or(PolicyError::PolicyNotFound(policy_id))?;

        if policy.holder.party_id != requester {
            warn!(policy_id = %policy_id, requester = %requester, "Renewal refused for non-holder");
            return Err(PolicyError::NotPolicyholder { policy_id, requester });
        }

        let new_policy = policy.renewal();
        self.repository.save(&new_policy).await?;

        self.audit
            .record(
                AuditEvent::new(
                    AuditAction::PolicyRenewed,
                    Some(requester),
                    format!(
                        "Policy {} renewed as {}",
                        policy.display_number(),
                        new_policy.id
                    ),
                )
                .for_entity("POLICY", new_policy.id),
            )
            .await?;

        info!(
            old_policy_id = %policy_id,
            new_policy_id = %new_policy.id,
            start_date = %new_policy.start_date,
            "Policy renewed"
        );

        Ok(RenewalOutcome {
            old_policy_id: policy_id,
            new_policy,
        })
    }
}
