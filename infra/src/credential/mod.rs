//! Opaque session credential issuance
//!
//! After successful verification the request layer hands out an opaque
//! credential. The token is a base64 blob of `subject:timestamp:nonce`;
//! session semantics (validation, revocation, lifetime) are outside the
//! OTP lifecycle and belong to whatever consumes the credential.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use uuid::Uuid;

use vc_core::services::otp::{CredentialIssuer, Verified};

/// Issues opaque base64 session credentials
#[derive(Debug, Clone, Default)]
pub struct SessionCredentialIssuer;

impl SessionCredentialIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialIssuer for SessionCredentialIssuer {
    fn issue_credential(&self, verified: &Verified) -> String {
        let raw = format!(
            "{}:{}:{}",
            verified.subject,
            verified.verified_at.timestamp(),
            Uuid::new_v4()
        );
        STANDARD.encode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn verified() -> Verified {
        Verified {
            subject: "5551234567".to_string(),
            verified_at: Utc::now(),
        }
    }

    #[test]
    fn test_credential_is_opaque_base64() {
        let issuer = SessionCredentialIssuer::new();
        let token = issuer.issue_credential(&verified());

        let decoded = STANDARD.decode(&token).unwrap();
        let decoded = String::from_utf8(decoded).unwrap();
        assert!(decoded.starts_with("5551234567:"));
    }

    #[test]
    fn test_credentials_are_unique_per_issue() {
        let issuer = SessionCredentialIssuer::new();
        let v = verified();

        assert_ne!(issuer.issue_credential(&v), issuer.issue_credential(&v));
    }
}
