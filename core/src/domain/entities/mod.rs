pub mod challenge;

pub use challenge::{Challenge, ChallengeStatus, CODE_LENGTH, DEFAULT_VALIDITY_SECONDS, MAX_ATTEMPTS};
