//! Periodic sweep task for expired challenges
//!
//! A single interval-driven task replaces per-entry cleanup timers: one
//! tick scans the store and removes everything whose expiry has passed,
//! bounding memory growth under abandoned challenges.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

use crate::errors::OtpResult;

use super::service::OtpService;
use super::traits::{ChallengeStore, DeliveryNotifier};

/// Configuration for the challenge sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether the background task is enabled
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

/// Background sweeper for expired, unconsumed challenges
pub struct ChallengeSweeper<S, N>
where
    S: ChallengeStore + 'static,
    N: DeliveryNotifier + 'static,
{
    service: Arc<OtpService<S, N>>,
    config: SweeperConfig,
}

impl<S, N> ChallengeSweeper<S, N>
where
    S: ChallengeStore + 'static,
    N: DeliveryNotifier + 'static,
{
    /// Create a new sweeper over a session manager
    pub fn new(service: Arc<OtpService<S, N>>, config: SweeperConfig) -> Self {
        Self { service, config }
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    ///
    /// The number of expired challenges removed
    pub async fn run_sweep(&self) -> OtpResult<usize> {
        self.service.sweep_expired().await
    }

    /// Spawn the periodic sweep loop on the current runtime
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            if !self.config.enabled {
                return;
            }

            let mut ticker = interval(Duration::from_secs(self.config.interval_seconds));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; skip it so a sweep never
            // races service startup
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match self.service.sweep_expired().await {
                    Ok(0) => {}
                    Ok(removed) => {
                        info!(removed, event = "sweep_completed", "Swept expired challenges");
                    }
                    Err(e) => {
                        error!(error = %e, event = "sweep_failed", "Challenge sweep failed");
                    }
                }
            }
        })
    }
}
