//! Rate limited execution of user actions.

use std::future::Future;
use std::sync::Arc;

use vitrine_core::ports::{RateLimitExceeded, RateLimiter};

use crate::policy::ActionPolicy;

/// Fallback rejection message when the policy does not carry one.
const GENERIC_MESSAGE: &str = "Too many requests";

/// Runs user actions through a rate limiter.
///
/// The guard owns nothing but a handle to the limiter; clones share the
/// same budget.
#[derive(Clone)]
pub struct ActionGuard {
    limiter: Arc<dyn RateLimiter>,
}

impl ActionGuard {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }

    /// Run `action` if the policy's budget allows it.
    ///
    /// On rejection the action is never started and the error carries a
    /// user-facing message with the wait in whole seconds, rounded up and
    /// never below one.
    pub async fn run<F, Fut, T>(
        &self,
        policy: &ActionPolicy,
        action: F,
    ) -> Result<T, RateLimitExceeded>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if self
            .limiter
            .is_allowed(&policy.key, policy.limit, policy.window)
            .await
        {
            return Ok(action().await);
        }

        let retry_in = self.limiter.reset_in(&policy.key).await;

        let mut secs = retry_in.as_secs();
        if retry_in.subsec_nanos() > 0 {
            secs += 1;
        }
        let secs = secs.max(1);

        let base = policy.message.as_deref().unwrap_or(GENERIC_MESSAGE);

        tracing::warn!(key = %policy.key, retry_in_secs = secs, "Action rate limited");

        Err(RateLimitExceeded {
            message: format!("{base}. Try again in {secs} seconds."),
            retry_in,
        })
    }
}
