//! Certificate Data Tests

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{PartyId, PortError};
use domain_policy::certificate::mock::PlainTextRenderer;
use domain_policy::product::seed;
use domain_policy::{
    issue_certificate, CertificateRenderer, InMemoryProductCatalog, PolicyCertificate,
    PolicyError, PolicyHolder, PolicyRecord, ProductCatalog, RatingRequest, RatingService,
};
use std::sync::Arc;

fn issued_policy() -> (PolicyRecord, domain_policy::Product) {
    let catalog = InMemoryProductCatalog::seeded();
    let product = catalog.find(&seed::TERM_LIFE).unwrap();
    let quote = RatingService::new(Arc::new(catalog))
        .quote(&RatingRequest::new(seed::TERM_LIFE).with_age(35))
        .unwrap();
    let holder = PolicyHolder {
        party_id: PartyId::from_u128(42),
        name: "Arjun Mehta".to_string(),
        email: None,
        phone: None,
    };
    let mut policy = PolicyRecord::from_quote(holder, &quote, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    policy.activate("POL-2026-0007").unwrap();
    (policy, product)
}

struct FailingRenderer;

impl CertificateRenderer for FailingRenderer {
    fn render(&self, _certificate: &PolicyCertificate) -> Result<Vec<u8>, PortError> {
        Err(PortError::unavailable("renderer"))
    }
}

/// Breakdown lines follow rating order with the rupee sign
#[test]
fn test_breakdown_lines() {
    let (policy, product) = issued_policy();
    let certificate = PolicyCertificate::from_policy(&policy, &product, Utc::now()).unwrap();

    assert_eq!(
        certificate.breakdown_lines(),
        vec!["Base Premium: ₹10000.00".to_string(), "Age Factor: ₹7000.00".to_string()]
    );
    assert_eq!(certificate.features, product.features);
}

/// Issuing returns the rendered document and the QR payload JSON
#[test]
fn test_issue_certificate() {
    let (policy, product) = issued_policy();
    let issued_at = Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap();

    let issued = issue_certificate(&PlainTextRenderer, &policy, &product, issued_at).unwrap();

    let text = String::from_utf8(issued.document).unwrap();
    assert!(text.contains("Policy Number: POL-2026-0007"));
    assert!(text.contains("✓ Death Benefit"));

    let payload: serde_json::Value = serde_json::from_str(&issued.qr_payload).unwrap();
    assert_eq!(payload["policyNumber"], "POL-2026-0007");
    assert_eq!(payload["verificationURL"], "https://insuretech.com/verify/POL-2026-0007");
    assert_eq!(payload["productName"], "Term Life Insurance");
}

/// Pending policies have no number and cannot be certified
#[test]
fn test_pending_policy_rejected() {
    let (mut policy, product) = issued_policy();
    policy.policy_number = None;

    let result = issue_certificate(&PlainTextRenderer, &policy, &product, Utc::now());

    assert!(matches!(result, Err(PolicyError::Validation(_))));
}

/// Renderer failures surface as port errors
#[test]
fn test_renderer_failure() {
    let (policy, product) = issued_policy();

    let result = issue_certificate(&FailingRenderer, &policy, &product, Utc::now());

    assert!(matches!(result, Err(PolicyError::Port(_))));
}
