//! Certificate data
//!
//! The domain assembles what goes on a policy certificate and the payload
//! of its verification QR code. Turning that into a document is the job of
//! a [`CertificateRenderer`] adapter.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{PartyId, PortError};

use crate::error::PolicyError;
use crate::policy::PolicyRecord;
use crate::product::Product;
use crate::rating::Breakdown;

const VERIFICATION_BASE_URL: &str = "https://insuretech.com/verify";

/// Content of the certificate's QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub policy_number: String,
    pub user_id: PartyId,
    pub product_name: String,
    #[serde(rename = "verificationURL")]
    pub verification_url: String,
    pub timestamp: DateTime<Utc>,
}

impl VerificationPayload {
    pub fn new(
        policy_number: impl Into<String>,
        user_id: PartyId,
        product_name: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let policy_number = policy_number.into();
        Self {
            verification_url: format!("{VERIFICATION_BASE_URL}/{policy_number}"),
            policy_number,
            user_id,
            product_name: product_name.into(),
            timestamp,
        }
    }

    /// JSON string encoded into the QR code
    pub fn to_json(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Everything printed on a policy certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCertificate {
    pub policy_number: String,
    pub holder_name: String,
    pub product_name: String,
    pub coverage_amount: Decimal,
    pub premium: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub breakdown: Breakdown,
    pub features: Vec<String>,
    pub verification: VerificationPayload,
}

impl PolicyCertificate {
    /// Builds the certificate for an activated policy
    ///
    /// # Errors
    ///
    /// Returns a validation error if the policy has no policy number yet
    pub fn from_policy(
        policy: &PolicyRecord,
        product: &Product,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, PolicyError> {
        let policy_number = policy.policy_number.clone().ok_or_else(|| {
            PolicyError::validation(format!("Policy {} has no policy number", policy.id))
        })?;

        let verification = VerificationPayload::new(
            policy_number.clone(),
            policy.holder.party_id,
            policy.product_name.clone(),
            issued_at,
        );

        Ok(Self {
            policy_number,
            holder_name: policy.holder.name.clone(),
            product_name: policy.product_name.clone(),
            coverage_amount: policy.coverage_amount,
            premium: policy.premium_amount,
            start_date: policy.start_date,
            end_date: policy.end_date,
            breakdown: policy.premium_breakdown.clone(),
            features: product.features.clone(),
            verification,
        })
    }

    /// Premium breakdown as display lines, in rating order
    pub fn breakdown_lines(&self) -> Vec<String> {
        self.breakdown
            .iter()
            .map(|entry| format!("{}: ₹{}", entry.label, entry.amount))
            .collect()
    }
}

/// Renders a certificate into a document
pub trait CertificateRenderer: Send + Sync {
    fn render(&self, certificate: &PolicyCertificate) -> Result<Vec<u8>, PortError>;
}

/// A rendered certificate and the QR payload to store with the policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCertificate {
    pub document: Vec<u8>,
    pub qr_payload: String,
}

/// Assembles and renders the certificate for a policy
pub fn issue_certificate(
    renderer: &dyn CertificateRenderer,
    policy: &PolicyRecord,
    product: &Product,
    issued_at: DateTime<Utc>,
) -> Result<IssuedCertificate, PolicyError> {
    let certificate = PolicyCertificate::from_policy(policy, product, issued_at)?;
    let qr_payload = certificate.verification.to_json()?;
    let document = renderer.render(&certificate)?;

    tracing::info!(
        policy_number = %certificate.policy_number,
        bytes = document.len(),
        "Certificate issued"
    );

    Ok(IssuedCertificate { document, qr_payload })
}

/// Plain-text renderer for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    #[derive(Debug, Default, Clone, Copy)]
    pub struct PlainTextRenderer;

    impl CertificateRenderer for PlainTextRenderer {
        fn render(&self, certificate: &PolicyCertificate) -> Result<Vec<u8>, PortError> {
            let mut lines = vec![
                format!("Policy Number: {}", certificate.policy_number),
                format!("Policyholder: {}", certificate.holder_name),
                format!("Product: {}", certificate.product_name),
                format!("Coverage: ₹{}", certificate.coverage_amount),
                format!("Premium: ₹{}", certificate.premium),
                format!("Valid: {} to {}", certificate.start_date, certificate.end_date),
            ];
            lines.extend(certificate.breakdown_lines());
            lines.extend(certificate.features.iter().map(|f| format!("✓ {f}")));
            Ok(lines.join("\n").into_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_verification_payload_keys() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let payload = VerificationPayload::new("POL-2026-0001", PartyId::from_u128(1), "Term Life Insurance", ts);
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(json["policyNumber"], "POL-2026-0001");
        assert_eq!(json["verificationURL"], "https://insuretech.com/verify/POL-2026-0001");
        assert!(json.get("verificationUrl").is_none());
        assert_eq!(json["productName"], "Term Life Insurance");
        assert!(json.get("userId").is_some());
    }
}
