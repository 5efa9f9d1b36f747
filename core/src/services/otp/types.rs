//! Result types for the OTP session manager

use chrono::{DateTime, Utc};

use crate::domain::entities::challenge::Challenge;

/// Result of issuing a verification challenge
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    /// The challenge that was created (code included, for the delivery
    /// side channel only)
    pub challenge: Challenge,
    /// The delivery provider message id
    pub message_id: String,
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    /// The subject key that was verified
    pub subject: String,
    /// When the verification completed
    pub verified_at: DateTime<Utc>,
}
