//! Collaborator traits for storage, delivery, and credential issuance

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::challenge::Challenge;
use crate::errors::OtpResult;

use super::types::Verified;

/// Trait for challenge persistence
///
/// Implementations only provide the primitive operations; compound
/// read-check-modify sequences are serialized by the session manager, so
/// the store itself does not need to be transactional.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Fetch the challenge for a subject key, if any
    async fn get(&self, key: &str) -> OtpResult<Option<Challenge>>;
    /// Store a challenge under a subject key, replacing any existing entry
    async fn put(&self, key: &str, challenge: Challenge) -> OtpResult<()>;
    /// Remove the entry for a subject key (no-op if absent)
    async fn delete(&self, key: &str) -> OtpResult<()>;
    /// List the subject keys whose challenges expired before `now`
    async fn expired_keys(&self, now: DateTime<Utc>) -> OtpResult<Vec<String>>;
}

/// Trait for out-of-band code delivery (SMS, voice)
#[async_trait]
pub trait DeliveryNotifier: Send + Sync {
    /// Deliver a verification code to the subject, returning the provider
    /// message id
    async fn deliver_code(&self, subject: &str, code: &str) -> Result<String, String>;
}

/// Trait for minting an opaque session credential after verification
///
/// The credential is outside the OTP lifecycle itself; session semantics
/// belong to the caller.
pub trait CredentialIssuer: Send + Sync {
    fn issue_credential(&self, verified: &Verified) -> String;
}
