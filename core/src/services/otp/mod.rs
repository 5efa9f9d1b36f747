//! OTP session manager module
//!
//! This module provides the full verification challenge workflow:
//! - Code generation and delivery hand-off
//! - Verification with bounded attempts and single-use consumption
//! - Lazy expiry on verify plus a periodic background sweep
//! - Collaborator traits for the store, delivery, and credential issuance

mod config;
mod phone;
mod service;
mod sweeper;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use phone::{mask_subject_key, normalize_subject_key};
pub use service::OtpService;
pub use sweeper::{ChallengeSweeper, SweeperConfig};
pub use traits::{ChallengeStore, CredentialIssuer, DeliveryNotifier};
pub use types::{IssuedChallenge, Verified};
