//! No-op rate limiter for non-interactive contexts.

use std::time::Duration;

use async_trait::async_trait;

use vitrine_core::ports::RateLimiter;

/// Rate limiter that allows everything.
///
/// Server-rendered passes and other non-interactive contexts have no
/// visitor session to throttle, so they get this implementation through
/// the same trait instead of an environment check inside the real limiter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRateLimiter;

#[async_trait]
impl RateLimiter for NoopRateLimiter {
    async fn is_allowed(&self, _key: &str, _limit: u32, _window: Duration) -> bool {
        true
    }

    async fn remaining(&self, _key: &str, limit: u32) -> u32 {
        limit
    }

    async fn reset_in(&self, _key: &str) -> Duration {
        Duration::ZERO
    }

    async fn destroy(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_limits() {
        let limiter = NoopRateLimiter;
        let window = Duration::from_secs(60);

        for _ in 0..100 {
            assert!(limiter.is_allowed("anything", 1, window).await);
        }
        assert_eq!(limiter.remaining("anything", 1).await, 1);
        assert_eq!(limiter.reset_in("anything").await, Duration::ZERO);

        limiter.destroy().await;
    }
}
