//! In-memory fixed-window rate limiter.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use vitrine_core::ports::RateLimiter;

const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// How often the background sweep drops expired windows.
    pub sweep_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl RateLimitConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            sweep_interval: Duration::from_secs(
                std::env::var("RATE_LIMIT_SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SWEEP_INTERVAL.as_secs()),
            ),
        }
    }
}

/// One tracked window: how many actions ran and when the window ends.
#[derive(Debug)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// In-memory rate limiter using a fixed window per key.
///
/// Each key gets a counter that resets in full once its window expires, so
/// a caller can burst up to twice the limit across a window boundary. That
/// is accepted: this limiter is a client-side guard, and the backend keeps
/// the authoritative budget.
///
/// Note: limits are per-process, not distributed across instances.
///
/// A background task owned by each instance sweeps expired windows so the
/// key map cannot grow without bound. The task starts in [`new`] (a Tokio
/// runtime must be current) and stops on [`destroy`] or drop.
///
/// [`new`]: InMemoryRateLimiter::new
/// [`destroy`]: RateLimiter::destroy
pub struct InMemoryRateLimiter {
    entries: Arc<RwLock<HashMap<String, WindowEntry>>>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let entries: Arc<RwLock<HashMap<String, WindowEntry>>> =
            Arc::new(RwLock::new(HashMap::new()));

        // interval panics on zero
        let sweep_interval = config.sweep_interval.max(Duration::from_millis(1));

        let sweep_entries = entries.clone();
        let sweeper = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately; skip it
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let now = Instant::now();
                let mut entries = sweep_entries.write().await;
                let before = entries.len();
                entries.retain(|_, entry| now < entry.reset_at);
                let removed = before - entries.len();

                if removed > 0 {
                    tracing::debug!(
                        removed,
                        tracked = entries.len(),
                        "Swept expired rate limit windows"
                    );
                }
            }
        });

        tracing::debug!(
            sweep_interval_secs = sweep_interval.as_secs(),
            "Started rate limit sweep task"
        );

        Self {
            entries,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    /// Create from environment configuration.
    pub fn from_env() -> Self {
        Self::new(RateLimitConfig::from_env())
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn is_allowed(&self, key: &str, limit: u32, window: Duration) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let entry = entries
            .entry(key.to_string())
            .and_modify(|entry| {
                // expired window: start a fresh one
                if now >= entry.reset_at {
                    entry.count = 0;
                    entry.reset_at = now + window;
                }
            })
            .or_insert_with(|| WindowEntry {
                count: 0,
                reset_at: now + window,
            });

        if entry.count >= limit {
            return false;
        }

        entry.count += 1;
        true
    }

    async fn remaining(&self, key: &str, limit: u32) -> u32 {
        let now = Instant::now();
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some(entry) if now < entry.reset_at => limit.saturating_sub(entry.count),
            _ => limit,
        }
    }

    async fn reset_in(&self, key: &str) -> Duration {
        let now = Instant::now();
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some(entry) if now < entry.reset_at => entry.reset_at.saturating_duration_since(now),
            _ => Duration::ZERO,
        }
    }

    async fn destroy(&self) {
        if let Some(handle) = self.sweeper.lock().await.take() {
            handle.abort();
        }
        self.entries.write().await.clear();
        tracing::debug!("Rate limiter destroyed");
    }
}

impl Drop for InMemoryRateLimiter {
    fn drop(&mut self) {
        // destroy() may already have taken the handle; best effort here
        if let Ok(mut sweeper) = self.sweeper.try_lock() {
            if let Some(handle) = sweeper.take() {
                handle.abort();
            }
        }
    }
}
