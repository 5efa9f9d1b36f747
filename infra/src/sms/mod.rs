//! SMS delivery module
//!
//! Delivery notifier implementations for handing verification codes to an
//! out-of-band channel. The mock implementation prints codes to the console
//! for development and testing; real providers plug in behind the same
//! [`DeliveryNotifier`] trait.

pub mod mock_sms;

pub use mock_sms::MockSmsService;

use vc_core::services::otp::DeliveryNotifier;

use crate::config::SmsConfig;

/// Create a delivery notifier based on configuration
///
/// Unknown providers fall back to the mock implementation with a warning,
/// so a misconfigured environment still boots in development.
pub fn create_sms_service(config: &SmsConfig) -> Box<dyn DeliveryNotifier> {
    match config.provider.as_str() {
        "mock" => Box::new(MockSmsService::new()),
        other => {
            tracing::warn!(
                provider = other,
                "Unknown SMS provider, falling back to mock delivery"
            );
            Box::new(MockSmsService::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_builds_mock() {
        let service = create_sms_service(&SmsConfig::default());
        let message_id = service.deliver_code("5551234567", "042917").await.unwrap();
        assert!(message_id.starts_with("mock_"));
    }

    #[tokio::test]
    async fn test_factory_falls_back_on_unknown_provider() {
        let config = SmsConfig {
            provider: "carrier-pigeon".to_string(),
            ..SmsConfig::default()
        };
        let service = create_sms_service(&config);
        assert!(service.deliver_code("5551234567", "042917").await.is_ok());
    }
}
