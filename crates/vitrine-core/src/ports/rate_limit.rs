//! Rate limiting port.
//!
//! The limiter is advisory: it throttles client-initiated actions before
//! they reach the network and is trivially bypassable, so real enforcement
//! stays with the backend. Implementations must fail open rather than block
//! browsing or checkout.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - abstraction over per-key action throttling.
///
/// `limit` and `window` travel with each call because different actions
/// (cart updates, payment attempts) carry different budgets against the
/// same limiter instance.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record an attempt for `key` within a fixed window of `window` length.
    /// Returns `true` if the attempt is allowed, `false` once `limit`
    /// attempts were already recorded in the current window.
    async fn is_allowed(&self, key: &str, limit: u32, window: Duration) -> bool;

    /// Attempts still allowed for `key` in the current window, or `limit`
    /// when no live window exists.
    async fn remaining(&self, key: &str, limit: u32) -> u32;

    /// Time until the current window for `key` expires, or zero when no
    /// live window exists.
    async fn reset_in(&self, key: &str) -> Duration;

    /// Stop any background work and drop all tracked windows. The limiter
    /// owner calls this on teardown; calling it twice is harmless.
    async fn destroy(&self);
}

/// Error produced when a rate-limited action is rejected.
///
/// Carries a display-ready message for the end user; callers present it,
/// they do not retry automatically.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct RateLimitExceeded {
    /// Human-readable message embedding the remaining wait time.
    pub message: String,
    /// How long until the window resets.
    pub retry_in: Duration,
}
