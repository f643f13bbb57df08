//! Ports for external collaborators
//!
//! The policy administration domain does not deliver notifications or perform
//! encryption itself. It consumes these capabilities through the traits in
//! this module, and adapters at the edge of the system implement them.
//!
//! ```text
//!   RenewalService ──► Notifier ──► (SMTP / SMS gateway adapter)
//!   KycService     ──► Cipher   ──► (AES adapter)
//!   *Service       ──► AuditLog ──► (database adapter)
//! ```

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for port operations
///
/// All adapters report failures through this type so domain services can
/// handle them uniformly.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a ServiceUnavailable error
    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Creates an Internal error without a source
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if retrying the operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, PortError::ServiceUnavailable { .. })
    }
}

/// An e-mail to be delivered by a notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// A text message to be delivered by a notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

/// Acknowledgement returned by a notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// True when the adapter only logged the message instead of sending it
    pub simulated: bool,
    pub accepted_at: DateTime<Utc>,
}

/// Outbound notification capability (e-mail and SMS)
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends an e-mail
    async fn send_email(&self, message: EmailMessage) -> Result<DeliveryReceipt, PortError>;

    /// Sends an SMS
    async fn send_sms(&self, message: SmsMessage) -> Result<DeliveryReceipt, PortError>;
}

/// Symmetric encryption capability for sensitive fields
///
/// Implementations own their key material. Cipher text is an opaque string
/// that only the same implementation can decrypt.
pub trait Cipher: Send + Sync {
    /// Encrypts a plaintext value
    fn encrypt(&self, plaintext: &str) -> Result<String, PortError>;

    /// Decrypts a value produced by [`Cipher::encrypt`]
    fn decrypt(&self, ciphertext: &str) -> Result<String, PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! In-memory adapters for tests

    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    /// Notifier that records every message instead of delivering it
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        emails: Mutex<Vec<EmailMessage>>,
        sms: Mutex<Vec<SmsMessage>>,
        failing: AtomicBool,
    }

    impl RecordingNotifier {
        /// Creates a new recording notifier
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every subsequent send fail with `ServiceUnavailable`
        pub fn fail_all(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }

        /// Returns the e-mails sent so far
        pub async fn emails(&self) -> Vec<EmailMessage> {
            self.emails.lock().await.clone()
        }

        /// Returns the text messages sent so far
        pub async fn sms(&self) -> Vec<SmsMessage> {
            self.sms.lock().await.clone()
        }

        fn check(&self) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("notifier"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_email(&self, message: EmailMessage) -> Result<DeliveryReceipt, PortError> {
            self.check()?;
            self.emails.lock().await.push(message);
            Ok(DeliveryReceipt { simulated: true, accepted_at: Utc::now() })
        }

        async fn send_sms(&self, message: SmsMessage) -> Result<DeliveryReceipt, PortError> {
            self.check()?;
            self.sms.lock().await.push(message);
            Ok(DeliveryReceipt { simulated: true, accepted_at: Utc::now() })
        }
    }

    /// Reversible stand-in cipher that hex-encodes the plaintext
    #[derive(Debug, Default, Clone, Copy)]
    pub struct HexEncodingCipher;

    const PREFIX: &str = "hex:";

    impl Cipher for HexEncodingCipher {
        fn encrypt(&self, plaintext: &str) -> Result<String, PortError> {
            let encoded: String = plaintext.bytes().map(|b| format!("{:02x}", b)).collect();
            Ok(format!("{}{}", PREFIX, encoded))
        }

        fn decrypt(&self, ciphertext: &str) -> Result<String, PortError> {
            let hex = ciphertext
                .strip_prefix(PREFIX)
                .ok_or_else(|| PortError::validation("ciphertext is missing its prefix"))?;
            if hex.len() % 2 != 0 || !hex.is_ascii() {
                return Err(PortError::validation("ciphertext is not well-formed hex"));
            }
            let bytes = (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
                .collect::<Result<Vec<u8>, _>>()
                .map_err(|e| PortError::validation(format!("invalid ciphertext: {}", e)))?;
            String::from_utf8(bytes)
                .map_err(|e| PortError::validation(format!("invalid plaintext: {}", e)))
        }
    }
}
