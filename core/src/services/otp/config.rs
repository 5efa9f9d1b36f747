//! Configuration for the OTP session manager

use crate::domain::entities::challenge::{DEFAULT_VALIDITY_SECONDS, MAX_ATTEMPTS};

/// Configuration for the OTP session manager
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds before an issued code expires
    pub code_validity_seconds: i64,
    /// Maximum number of verification attempts allowed
    pub max_attempts: u32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_validity_seconds: DEFAULT_VALIDITY_SECONDS,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}
