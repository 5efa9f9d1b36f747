//! Mock SMS delivery implementation
//!
//! Logs verification codes to the console instead of sending them, the way
//! the backend runs in development and testing. Tracks a message counter
//! and can simulate provider failures.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use vc_core::services::otp::{mask_subject_key, DeliveryNotifier};

/// Mock delivery notifier for development and testing
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate delivery failures
    simulate_failure: bool,
    /// Whether to print codes to the console
    console_output: bool,
}

impl MockSmsService {
    /// Create a new mock delivery notifier with console output
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock notifier with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Total number of messages delivered
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryNotifier for MockSmsService {
    async fn deliver_code(&self, subject: &str, code: &str) -> Result<String, String> {
        let masked = mask_subject_key(subject);

        if self.simulate_failure {
            warn!(
                subject = %masked,
                "Mock SMS service simulating delivery failure"
            );
            return Err("simulated SMS delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            // Development convenience: the only place the code is shown
            println!("OTP for {}: {} (message #{})", subject, code, count);
        }

        info!(
            target: "sms_service",
            provider = "mock",
            subject = %masked,
            message_id = %message_id,
            "Mock SMS delivered"
        );

        Ok(message_id)
    }
}
