//! Tests for core_kernel port errors

use core_kernel::PortError;

#[test]
fn test_port_error_display() {
    let error = PortError::not_found("KycDocument", "KYC-1");
    assert_eq!(error.to_string(), "Not found: KycDocument with id KYC-1");
}

#[test]
fn test_port_error_validation_message() {
    let error = PortError::validation("ciphertext is not hex");

    match error {
        PortError::Validation { message } => assert_eq!(message, "ciphertext is not hex"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_only_unavailable_is_retryable() {
    assert!(PortError::unavailable("notifier").is_retryable());
    assert!(!PortError::conflict("duplicate document").is_retryable());
    assert!(!PortError::internal("disk full").is_retryable());
    assert!(!PortError::not_found("Policy", "POL-1").is_retryable());
}

#[test]
fn test_unavailable_display() {
    assert_eq!(
        PortError::unavailable("sms-gateway").to_string(),
        "Service unavailable: sms-gateway"
    );
}
