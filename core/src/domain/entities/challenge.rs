//! Challenge entity for phone-number OTP verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default validity window for verification codes (5 minutes)
pub const DEFAULT_VALIDITY_SECONDS: i64 = 300;

/// Lifecycle status of a challenge
///
/// `Verified`, `Expired`, and `Blocked` are terminal; terminal entries are
/// removed from the store so a later lookup observes "entry absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Pending,
    Verified,
    Expired,
    Blocked,
}

/// A single pending OTP verification tied to a subject key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique identifier for this challenge
    pub id: Uuid,

    /// Normalized subject key (canonical 10-digit phone number)
    pub subject: String,

    /// The 6-digit verification code
    pub code: String,

    /// Number of failed verification attempts made
    pub attempts: u32,

    /// Ceiling on verification attempts
    pub max_attempts: u32,

    /// Timestamp when the challenge was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the challenge expires
    pub expires_at: DateTime<Utc>,

    /// Current lifecycle status
    pub status: ChallengeStatus,
}

impl Challenge {
    /// Creates a new pending challenge with a fresh random code and the
    /// default validity window
    pub fn new(subject: String) -> Self {
        Self::new_with_validity(subject, Duration::seconds(DEFAULT_VALIDITY_SECONDS), MAX_ATTEMPTS)
    }

    /// Creates a new pending challenge with a custom validity window and
    /// attempt ceiling
    pub fn new_with_validity(subject: String, validity: Duration, max_attempts: u32) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            subject,
            code: Self::generate_code(),
            attempts: 0,
            max_attempts,
            created_at: now,
            expires_at: now + validity,
            status: ChallengeStatus::Pending,
        }
    }

    /// Generates a random 6-digit code from the OS CSPRNG.
    ///
    /// Uses the zero-padded full-range policy: uniform over `[0, 999999]`,
    /// formatted with leading zeros, so every digit position is uniformly
    /// distributed. The modulo bias on a 32-bit draw is negligible here.
    fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        let code = u32::from_le_bytes(bytes) % 1_000_000;
        format!("{:06}", code)
    }

    /// Checks whether the challenge has expired as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks whether the challenge has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks whether the challenge is still active: pending, unexpired,
    /// and under the attempt ceiling
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == ChallengeStatus::Pending
            && !self.is_expired_at(now)
            && self.attempts < self.max_attempts
    }

    /// Compares a submitted code against the stored code.
    ///
    /// Exact-length, exact-value string comparison in constant time; a
    /// numeric comparison would collapse `"042917"` and `"42917"`.
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len() && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Records a failed verification attempt.
    ///
    /// Returns the number of attempts remaining after the increment; the
    /// challenge transitions to `Blocked` when the ceiling is reached.
    pub fn register_failure(&mut self) -> u32 {
        self.attempts = (self.attempts + 1).min(self.max_attempts);
        if self.attempts >= self.max_attempts {
            self.status = ChallengeStatus::Blocked;
        }
        self.remaining_attempts()
    }

    /// Gets the number of remaining verification attempts (0 if exhausted)
    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    /// Seconds until expiry as of `now` (0 if already expired)
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
