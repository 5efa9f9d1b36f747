//! # Infrastructure Layer
//!
//! Concrete implementations of the VibeCheck core collaborator traits:
//! - **Store**: in-memory challenge store
//! - **SMS**: delivery notifier implementations (mock/console for development)
//! - **Credential**: opaque session credential issuer

// Re-export core types for convenience
pub use vc_core::errors::*;

/// Challenge store implementations
pub mod store;

/// SMS delivery implementations
pub mod sms;

/// Session credential issuance
pub mod credential;

/// Configuration module for infrastructure services
pub mod config {
    //! Environment-driven configuration for infrastructure services

    use serde::{Deserialize, Serialize};

    /// SMS delivery configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SmsConfig {
        /// Delivery provider ("mock" is the only built-in)
        pub provider: String,
        /// Sender phone number
        pub from_number: String,
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                from_number: "+15550000000".to_string(),
            }
        }
    }

    impl SmsConfig {
        /// Load SMS configuration from the environment (reads `.env` if present)
        pub fn from_env() -> Self {
            dotenvy::dotenv().ok();

            Self {
                provider: std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
                from_number: std::env::var("SMS_FROM_NUMBER")
                    .unwrap_or_else(|_| "+15550000000".to_string()),
            }
        }
    }
}
