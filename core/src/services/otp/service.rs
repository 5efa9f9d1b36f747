//! OTP session manager implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use crate::domain::entities::challenge::Challenge;
use crate::errors::{OtpError, OtpResult};

use super::config::OtpServiceConfig;
use super::phone::{mask_subject_key, normalize_subject_key};
use super::traits::{ChallengeStore, DeliveryNotifier};
use super::types::{IssuedChallenge, Verified};

/// OTP session manager: a keyed store of pending verification challenges
/// with lifecycle transitions.
///
/// All compound read-check-modify sequences run under a single exclusive
/// lock; per-key locking is unnecessary at the expected contention. The
/// delivery call is made outside the critical section.
pub struct OtpService<S: ChallengeStore, N: DeliveryNotifier> {
    /// Challenge persistence
    store: Arc<S>,
    /// Out-of-band code delivery
    notifier: Arc<N>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Serializes issue/verify/sweep against the store
    op_lock: Mutex<()>,
}

impl<S: ChallengeStore, N: DeliveryNotifier> OtpService<S, N> {
    /// Create a new OTP session manager
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            notifier,
            config,
            op_lock: Mutex::new(()),
        }
    }

    /// Issue a new verification challenge for a subject.
    ///
    /// Rejects with `AlreadyActive` while a pending, unexpired challenge
    /// exists for the key (one outstanding code at a time); an expired
    /// leftover entry is overwritten. The code is handed to the delivery
    /// notifier after the store critical section; if delivery fails the
    /// just-created entry is rolled back so the subject is not left with an
    /// undeliverable active challenge blocking retries.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedChallenge)` - the created challenge and delivery message id
    /// * `Err(OtpError)` - `InvalidKey`, `AlreadyActive`, `DeliveryFailed`,
    ///   or a storage error
    pub async fn issue(&self, subject: &str) -> OtpResult<IssuedChallenge> {
        let key = normalize_subject_key(subject).ok_or_else(|| {
            tracing::warn!(
                subject = %mask_subject_key(subject),
                event = "invalid_subject_key",
                "Rejected issue request for malformed subject key"
            );
            OtpError::InvalidKey {
                key: mask_subject_key(subject),
            }
        })?;

        let challenge = {
            let _guard = self.op_lock.lock().await;
            let now = Utc::now();

            if let Some(existing) = self.store.get(&key).await? {
                if existing.is_active_at(now) {
                    let retry_after_seconds = existing.seconds_until_expiry(now);
                    tracing::warn!(
                        subject = %mask_subject_key(&key),
                        retry_after_seconds,
                        event = "challenge_already_active",
                        "Rejected issue request while a challenge is still active"
                    );
                    return Err(OtpError::AlreadyActive { retry_after_seconds });
                }
                // Expired or otherwise terminal leftover, safe to replace
                self.store.delete(&key).await?;
            }

            let challenge = Challenge::new_with_validity(
                key.clone(),
                Duration::seconds(self.config.code_validity_seconds),
                self.config.max_attempts,
            );
            self.store.put(&key, challenge.clone()).await?;

            tracing::info!(
                subject = %mask_subject_key(&key),
                challenge_id = %challenge.id,
                expires_at = %challenge.expires_at,
                event = "otp_generated",
                "Generated new verification challenge"
            );

            challenge
        };

        // Delivery happens outside the lock; never hold it across I/O
        match self.notifier.deliver_code(&key, &challenge.code).await {
            Ok(message_id) => {
                tracing::info!(
                    subject = %mask_subject_key(&key),
                    message_id = %message_id,
                    event = "otp_delivered",
                    "Verification code handed to delivery provider"
                );
                Ok(IssuedChallenge { challenge, message_id })
            }
            Err(e) => {
                tracing::error!(
                    subject = %mask_subject_key(&key),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Delivery failed, rolling back challenge"
                );
                // The delivery failure is the cause the caller needs; a
                // rollback failure only gets logged
                if let Err(rollback_err) = self.rollback(&key, &challenge).await {
                    tracing::error!(
                        subject = %mask_subject_key(&key),
                        error = %rollback_err,
                        event = "otp_rollback_failed",
                        "Failed to roll back challenge after delivery failure"
                    );
                }
                Err(OtpError::DeliveryFailed { message: e })
            }
        }
    }

    /// Verify a submitted code for a subject.
    ///
    /// Expiry is evaluated lazily here: an expired entry is removed and
    /// rejected even when the submitted code is correct. A wrong code
    /// increments the attempt counter; reaching the ceiling removes the
    /// entry permanently, so a correct code afterwards observes `NotFound`.
    /// A correct code consumes the entry (single-use).
    ///
    /// # Returns
    ///
    /// * `Ok(Verified)` - the subject key and verification timestamp
    /// * `Err(OtpError)` - `InvalidKey`, `NotFound`, `Expired`, `Blocked`,
    ///   `InvalidCode`, or a storage error
    pub async fn verify(&self, subject: &str, submitted: &str) -> OtpResult<Verified> {
        let key = normalize_subject_key(subject).ok_or_else(|| OtpError::InvalidKey {
            key: mask_subject_key(subject),
        })?;

        let _guard = self.op_lock.lock().await;
        let now = Utc::now();

        let mut challenge = match self.store.get(&key).await? {
            Some(challenge) => challenge,
            None => {
                tracing::warn!(
                    subject = %mask_subject_key(&key),
                    event = "otp_not_found",
                    "Verification attempted with no pending challenge"
                );
                return Err(OtpError::NotFound);
            }
        };

        if challenge.is_expired_at(now) {
            self.store.delete(&key).await?;
            tracing::warn!(
                subject = %mask_subject_key(&key),
                challenge_id = %challenge.id,
                event = "otp_expired",
                "Verification attempted against an expired challenge"
            );
            return Err(OtpError::Expired);
        }

        if challenge.remaining_attempts() == 0 {
            // Should not linger: the increment path deletes at the ceiling
            self.store.delete(&key).await?;
            tracing::warn!(
                subject = %mask_subject_key(&key),
                challenge_id = %challenge.id,
                event = "otp_blocked",
                "Verification attempted against an exhausted challenge"
            );
            return Err(OtpError::Blocked);
        }

        if !challenge.matches(submitted) {
            let remaining = challenge.register_failure();
            if remaining == 0 {
                self.store.delete(&key).await?;
                tracing::warn!(
                    subject = %mask_subject_key(&key),
                    challenge_id = %challenge.id,
                    event = "max_attempts_exceeded",
                    "Attempt ceiling reached, challenge invalidated"
                );
            } else {
                self.store.put(&key, challenge.clone()).await?;
                tracing::warn!(
                    subject = %mask_subject_key(&key),
                    challenge_id = %challenge.id,
                    remaining,
                    event = "otp_verification_failed",
                    "Wrong verification code submitted"
                );
            }
            return Err(OtpError::InvalidCode { remaining });
        }

        // Single-use: consume on success
        self.store.delete(&key).await?;
        tracing::info!(
            subject = %mask_subject_key(&key),
            challenge_id = %challenge.id,
            event = "otp_verified",
            "Verification code successfully verified"
        );

        Ok(Verified {
            subject: key,
            verified_at: now,
        })
    }

    /// Remove every expired, unconsumed challenge.
    ///
    /// Takes the same exclusive lock as `issue`/`verify`, so an entry is
    /// never deleted mid-verification. Consumed entries are already gone
    /// and are never touched.
    ///
    /// # Returns
    ///
    /// The number of entries removed
    pub async fn sweep_expired(&self) -> OtpResult<usize> {
        let _guard = self.op_lock.lock().await;
        let now = Utc::now();

        let expired = self.store.expired_keys(now).await?;
        for key in &expired {
            self.store.delete(key).await?;
            tracing::debug!(
                subject = %mask_subject_key(key),
                event = "otp_swept",
                "Removed expired challenge"
            );
        }

        Ok(expired.len())
    }

    /// Delete the just-created challenge after a delivery failure.
    ///
    /// Matched by challenge id: if a concurrent call already consumed or
    /// replaced the entry between the store write and the delivery result,
    /// the rollback leaves it alone.
    async fn rollback(&self, key: &str, issued: &Challenge) -> OtpResult<()> {
        let _guard = self.op_lock.lock().await;

        if let Some(current) = self.store.get(key).await? {
            if current.id == issued.id {
                self.store.delete(key).await?;
            }
        }
        Ok(())
    }
}
