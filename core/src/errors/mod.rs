//! Error types for the OTP verification lifecycle.
//!
//! Every variant except `Storage` and `Internal` is a recoverable,
//! user-facing rejection; none is fatal to the process. Lifecycle details
//! never leak through the internal variants.

use thiserror::Error;

/// OTP lifecycle errors
#[derive(Error, Debug)]
pub enum OtpError {
    /// The subject key failed normalization (defensive fast-fail; format
    /// validation is owned by the request layer)
    #[error("invalid subject key: {key}")]
    InvalidKey { key: String },

    /// A pending, unexpired challenge already exists for this subject
    #[error("an active verification code already exists, retry in {retry_after_seconds}s")]
    AlreadyActive { retry_after_seconds: i64 },

    /// No challenge exists for the subject (never issued, consumed, or swept)
    #[error("no pending verification for this subject")]
    NotFound,

    /// The challenge expired before verification
    #[error("verification code has expired")]
    Expired,

    /// The attempt ceiling was already reached
    #[error("maximum verification attempts exceeded")]
    Blocked,

    /// The submitted code did not match
    #[error("invalid verification code, {remaining} attempt(s) remaining")]
    InvalidCode { remaining: u32 },

    /// The delivery collaborator failed; the challenge was rolled back
    #[error("failed to deliver verification code: {message}")]
    DeliveryFailed { message: String },

    /// The challenge store failed
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Programming-error class, distinct from the user-facing taxonomy
    #[error("internal error: {message}")]
    Internal { message: String },
}

pub type OtpResult<T> = Result<T, OtpError>;
