//! Client state - shared across all storefront surfaces.

use std::sync::Arc;

use vitrine_core::domain::CartSnapshot;
use vitrine_core::ports::{RateLimiter, SessionStore};
use vitrine_infra::{InMemoryRateLimiter, NoopRateLimiter, RateLimitConfig};

use crate::counter::CartCounter;
use crate::guard::ActionGuard;

/// Client runtime configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whether this process serves an interactive visitor session.
    /// Non-interactive contexts (prerendering, background jobs) get a
    /// no-op limiter through the same trait.
    pub interactive: bool,
    pub rate_limit: RateLimitConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            interactive: std::env::var("CLIENT_INTERACTIVE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}

/// Shared client state.
///
/// One instance per visitor session; clones share the counter and the
/// limiter budgets.
#[derive(Clone)]
pub struct ClientState {
    pub counter: Arc<CartCounter>,
    pub guard: ActionGuard,
    pub limiter: Arc<dyn RateLimiter>,
}

impl ClientState {
    /// Build the client state with appropriate implementations.
    pub async fn new(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
        snapshot: Option<&CartSnapshot>,
    ) -> Self {
        let limiter: Arc<dyn RateLimiter> = if config.interactive {
            Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone()))
        } else {
            tracing::info!("Non-interactive context - rate limiting disabled");
            Arc::new(NoopRateLimiter)
        };

        let counter = Arc::new(CartCounter::new(store, snapshot).await);
        let guard = ActionGuard::new(limiter.clone());

        tracing::info!(interactive = config.interactive, "Client state initialized");

        Self {
            counter,
            guard,
            limiter,
        }
    }

    /// Stop background work and drop the per-session budgets.
    pub async fn shutdown(&self) {
        self.limiter.destroy().await;
        tracing::info!("Client state shut down");
    }
}
