//! Integration tests for the OTP lifecycle against real infrastructure
//! implementations: in-memory store, mock SMS delivery, and the session
//! credential issuer.

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use vc_core::errors::OtpError;
use vc_core::services::otp::{
    ChallengeSweeper, CredentialIssuer, OtpService, OtpServiceConfig, SweeperConfig,
};
use vc_infra::credential::SessionCredentialIssuer;
use vc_infra::sms::MockSmsService;
use vc_infra::store::InMemoryChallengeStore;

const PHONE: &str = "5551234567";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn make_service(
    config: OtpServiceConfig,
) -> (
    Arc<OtpService<InMemoryChallengeStore, MockSmsService>>,
    Arc<InMemoryChallengeStore>,
    Arc<MockSmsService>,
) {
    let store = Arc::new(InMemoryChallengeStore::new());
    let notifier = Arc::new(MockSmsService::with_options(false, false));
    let service = Arc::new(OtpService::new(store.clone(), notifier.clone(), config));
    (service, store, notifier)
}

#[tokio::test]
async fn test_full_lifecycle_issue_verify_credential() {
    init_tracing();
    let (service, store, notifier) = make_service(OtpServiceConfig::default());

    // Issue: code delivered, entry stored
    let issued = service.issue("+1 (555) 123-4567").await.unwrap();
    assert_eq!(issued.challenge.subject, PHONE);
    assert_eq!(notifier.message_count(), 1);
    assert_eq!(store.len().await, 1);

    // Immediate re-issue is rejected while the challenge is live
    assert!(matches!(
        service.issue(PHONE).await,
        Err(OtpError::AlreadyActive { .. })
    ));

    // One wrong attempt, then the correct code
    match service.verify(PHONE, "wrong!").await {
        Err(OtpError::InvalidCode { remaining }) => assert_eq!(remaining, 2),
        other => panic!("expected InvalidCode, got {:?}", other),
    }
    let verified = service.verify(PHONE, &issued.challenge.code).await.unwrap();
    assert_eq!(verified.subject, PHONE);
    assert!(store.is_empty().await);

    // Round-trip succeeds exactly once
    assert!(matches!(
        service.verify(PHONE, &issued.challenge.code).await,
        Err(OtpError::NotFound)
    ));

    // Downstream credential is an opaque base64 blob naming the subject
    let issuer = SessionCredentialIssuer::new();
    let token = issuer.issue_credential(&verified);
    let decoded = String::from_utf8(STANDARD.decode(&token).unwrap()).unwrap();
    assert!(decoded.starts_with(PHONE));
}

#[tokio::test]
async fn test_attempt_ceiling_blocks_even_correct_code() {
    init_tracing();
    let (service, store, _) = make_service(OtpServiceConfig::default());

    let issued = service.issue(PHONE).await.unwrap();
    let wrong = if issued.challenge.code == "000000" { "111111" } else { "000000" };

    for expected in [2u32, 1, 0] {
        match service.verify(PHONE, wrong).await {
            Err(OtpError::InvalidCode { remaining }) => assert_eq!(remaining, expected),
            other => panic!("expected InvalidCode, got {:?}", other),
        }
    }

    // Entry removed at the ceiling; the correct code now observes NotFound
    assert!(store.is_empty().await);
    assert!(matches!(
        service.verify(PHONE, &issued.challenge.code).await,
        Err(OtpError::NotFound)
    ));
}

#[tokio::test]
async fn test_expired_code_rejected_and_reissuable() {
    init_tracing();
    let config = OtpServiceConfig {
        code_validity_seconds: 0,
        ..OtpServiceConfig::default()
    };
    let (service, store, _) = make_service(config);

    let issued = service.issue(PHONE).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(matches!(
        service.verify(PHONE, &issued.challenge.code).await,
        Err(OtpError::Expired)
    ));
    assert!(store.is_empty().await);

    // Expiry frees the key for a fresh issue
    let second = service.issue(PHONE).await.unwrap();
    assert_ne!(second.challenge.id, issued.challenge.id);
}

#[tokio::test]
async fn test_delivery_failure_leaves_no_challenge() {
    init_tracing();
    let store = Arc::new(InMemoryChallengeStore::new());
    let notifier = Arc::new(MockSmsService::with_options(false, true));
    let service = OtpService::new(store.clone(), notifier, OtpServiceConfig::default());

    assert!(matches!(
        service.issue(PHONE).await,
        Err(OtpError::DeliveryFailed { .. })
    ));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_background_sweeper_drains_abandoned_challenges() {
    init_tracing();
    let config = OtpServiceConfig {
        code_validity_seconds: 0,
        ..OtpServiceConfig::default()
    };
    let (service, store, _) = make_service(config);

    service.issue(PHONE).await.unwrap();
    service.issue("5559876543").await.unwrap();
    assert_eq!(store.len().await, 2);

    let sweeper = ChallengeSweeper::new(
        service,
        SweeperConfig {
            interval_seconds: 1,
            enabled: true,
        },
    );
    let handle = sweeper.spawn();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(store.is_empty().await);

    handle.abort();
}
