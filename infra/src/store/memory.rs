//! In-memory challenge store
//!
//! A `HashMap` behind a `tokio::sync::RwLock`, the injectable replacement
//! for a process-global map. Compound read-check-modify sequences are
//! serialized by the session manager, so the store only has to make each
//! primitive operation atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use vc_core::domain::entities::challenge::Challenge;
use vc_core::errors::OtpResult;
use vc_core::services::otp::ChallengeStore;

/// In-memory implementation of [`ChallengeStore`]
#[derive(Default)]
pub struct InMemoryChallengeStore {
    entries: RwLock<HashMap<String, Challenge>>,
}

impl InMemoryChallengeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held (expired or not)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ChallengeStore for InMemoryChallengeStore {
    async fn get(&self, key: &str) -> OtpResult<Option<Challenge>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, challenge: Challenge) -> OtpResult<()> {
        self.entries.write().await.insert(key.to_string(), challenge);
        Ok(())
    }

    async fn delete(&self, key: &str) -> OtpResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn expired_keys(&self, now: DateTime<Utc>) -> OtpResult<Vec<String>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|(_, challenge)| challenge.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect())
    }
}
