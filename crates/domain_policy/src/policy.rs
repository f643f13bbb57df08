//! Policy records
//!
//! A policy is created from an accepted quote in `PendingPayment`, becomes
//! `Active` once paid and numbered, and can be renewed into a fresh pending
//! policy that starts the day the old one ends.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{PartyId, PolicyId, ProductId};

use crate::error::PolicyError;
use crate::rating::{Breakdown, RatingResult};

/// Lifecycle status of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    PendingPayment,
    Active,
    Expired,
    Cancelled,
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            PolicyStatus::PendingPayment => "PENDING_PAYMENT",
            PolicyStatus::Active => "ACTIVE",
            PolicyStatus::Expired => "EXPIRED",
            PolicyStatus::Cancelled => "CANCELLED",
        };
        f.write_str(code)
    }
}

/// Policyholder contact details used for reminders and certificates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyHolder {
    pub party_id: PartyId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A stored policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub id: PolicyId,
    /// Assigned when the policy is activated
    pub policy_number: Option<String>,
    pub holder: PolicyHolder,
    pub product_id: ProductId,
    pub product_name: String,
    pub status: PolicyStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub premium_amount: Decimal,
    pub coverage_amount: Decimal,
    pub premium_breakdown: Breakdown,
    pub renewal_reminder_sent: bool,
    /// Verification payload embedded in the certificate QR code
    pub qr_payload: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Date one year after `date`, clamping 29 February to the 28th
pub fn one_year_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(12))
        .unwrap_or(date + Duration::days(365))
}

impl PolicyRecord {
    /// Creates a pending one-year policy from an accepted quote
    pub fn from_quote(holder: PolicyHolder, quote: &RatingResult, start_date: NaiveDate) -> Self {
        Self {
            id: PolicyId::new_v7(),
            policy_number: None,
            holder,
            product_id: quote.product_id,
            product_name: quote.product_name.clone(),
            status: PolicyStatus::PendingPayment,
            start_date,
            end_date: one_year_after(start_date),
            premium_amount: quote.premium_amount,
            coverage_amount: quote.coverage_amount,
            premium_breakdown: quote.breakdown.clone(),
            renewal_reminder_sent: false,
            qr_payload: None,
            created_at: Utc::now(),
        }
    }

    /// Activates a paid policy under the given policy number
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the policy is pending payment
    pub fn activate(&mut self, policy_number: impl Into<String>) -> Result<(), PolicyError> {
        if self.status != PolicyStatus::PendingPayment {
            return Err(PolicyError::InvalidStateTransition {
                from: self.status.to_string(),
                to: PolicyStatus::Active.to_string(),
            });
        }
        self.policy_number = Some(policy_number.into());
        self.status = PolicyStatus::Active;
        Ok(())
    }

    /// Policy number, or the policy id while no number is assigned
    pub fn display_number(&self) -> String {
        self.policy_number
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Stores the QR payload of the certificate issued for this policy
    pub fn attach_qr_payload(&mut self, payload: impl Into<String>) {
        self.qr_payload = Some(payload.into());
    }

    /// True if an active policy ends within `window_days` of `as_of` and has
    /// not been reminded yet
    ///
    /// Active policies whose end date has already passed are included.
    pub fn is_due_for_reminder(&self, as_of: NaiveDate, window_days: i64) -> bool {
        self.status == PolicyStatus::Active
            && !self.renewal_reminder_sent
            && self.end_date <= as_of + Duration::days(window_days)
    }

    /// Builds the pending successor policy for a renewal
    ///
    /// The successor keeps the product, premium, coverage, and breakdown and
    /// runs for one year from this policy's end date.
    pub fn renewal(&self) -> PolicyRecord {
        PolicyRecord {
            id: PolicyId::new_v7(),
            policy_number: None,
            holder: self.holder.clone(),
            product_id: self.product_id,
            product_name: self.product_name.clone(),
            status: PolicyStatus::PendingPayment,
            start_date: self.end_date,
            end_date: one_year_after(self.end_date),
            premium_amount: self.premium_amount,
            coverage_amount: self.coverage_amount,
            premium_breakdown: self.premium_breakdown.clone(),
            renewal_reminder_sent: false,
            qr_payload: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductType;
    use rust_decimal_macros::dec;

    fn quote() -> RatingResult {
        RatingResult {
            product_id: ProductId::from_u128(5),
            product_name: "Term Life Insurance".to_string(),
            product_type: ProductType::Life,
            premium_amount: dec!(17000.00),
            breakdown: [("Base Premium", dec!(10000)), ("Age Factor", dec!(7000))].into_iter().collect(),
            coverage_amount: dec!(50000000),
        }
    }

    fn holder() -> PolicyHolder {
        PolicyHolder {
            party_id: PartyId::new(),
            name: "John".to_string(),
            email: Some("john@example.com".to_string()),
            phone: Some("+91-9876543210".to_string()),
        }
    }

    #[test]
    fn test_from_quote_is_pending_for_one_year() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let policy = PolicyRecord::from_quote(holder(), &quote(), start);

        assert_eq!(policy.status, PolicyStatus::PendingPayment);
        assert_eq!(policy.end_date, NaiveDate::from_ymd_opt(2027, 3, 1).unwrap());
        assert_eq!(policy.premium_breakdown.get("Age Factor"), Some(dec!(7000)));
    }

    #[test]
    fn test_activate_only_from_pending() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut policy = PolicyRecord::from_quote(holder(), &quote(), start);

        policy.activate("POL-2026-0001").unwrap();
        assert_eq!(policy.display_number(), "POL-2026-0001");
        assert!(matches!(
            policy.activate("POL-2026-0002"),
            Err(PolicyError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_qr_payload_not_carried_into_renewal() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut policy = PolicyRecord::from_quote(holder(), &quote(), start);
        policy.activate("POL-2026-0001").unwrap();
        policy.attach_qr_payload(r#"{"policyNumber":"POL-2026-0001"}"#);

        assert_eq!(policy.qr_payload.as_deref(), Some(r#"{"policyNumber":"POL-2026-0001"}"#));
        assert_eq!(policy.renewal().qr_payload, None);
    }

    #[test]
    fn test_leap_day_renewal_clamps() {
        let leap = NaiveDate::from_ymd_opt(2028, 2, 29).unwrap();
        assert_eq!(one_year_after(leap), NaiveDate::from_ymd_opt(2029, 2, 28).unwrap());
    }
}
