//! Rate limit policies for storefront actions.
//!
//! Each policy names the budget one kind of user action gets. The presets
//! carry the defaults; deployments tune them through environment variables
//! without touching call sites.

use std::time::Duration;

/// Limiter key for cart line changes.
pub const CART_UPDATE_KEY: &str = "cart-update";
/// Limiter key for payment attempts.
pub const PAYMENT_ATTEMPT_KEY: &str = "payment-attempt";
/// Limiter key for storefront form submissions.
pub const FORM_SUBMIT_KEY: &str = "form-submit";

/// A named budget for one kind of user action.
#[derive(Debug, Clone)]
pub struct ActionPolicy {
    /// Limiter key the action is tracked under.
    pub key: String,
    /// Maximum actions per window.
    pub limit: u32,
    /// Window duration.
    pub window: Duration,
    /// Message prefix shown on rejection; `None` falls back to the generic
    /// "Too many requests".
    pub message: Option<String>,
}

impl ActionPolicy {
    pub fn new(key: impl Into<String>, limit: u32, window: Duration) -> Self {
        Self {
            key: key.into(),
            limit,
            window,
            message: None,
        }
    }

    /// Replace the generic rejection message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Budget for cart line changes: 20 per minute by default.
    ///
    /// Overridden with `CART_UPDATE_LIMIT` / `CART_UPDATE_WINDOW_SECS`.
    pub fn cart_update() -> Self {
        Self::new(
            CART_UPDATE_KEY,
            env_u32("CART_UPDATE_LIMIT", 20),
            env_window_secs("CART_UPDATE_WINDOW_SECS", 60),
        )
        .with_message("Too many cart updates")
    }

    /// Budget for payment attempts: 5 per minute by default.
    ///
    /// Overridden with `PAYMENT_ATTEMPT_LIMIT` / `PAYMENT_ATTEMPT_WINDOW_SECS`.
    pub fn payment_attempt() -> Self {
        Self::new(
            PAYMENT_ATTEMPT_KEY,
            env_u32("PAYMENT_ATTEMPT_LIMIT", 5),
            env_window_secs("PAYMENT_ATTEMPT_WINDOW_SECS", 60),
        )
        .with_message("Too many payment attempts")
    }

    /// Budget for form submissions: 10 per minute by default.
    ///
    /// Overridden with `FORM_SUBMIT_LIMIT` / `FORM_SUBMIT_WINDOW_SECS`.
    pub fn form_submit() -> Self {
        Self::new(
            FORM_SUBMIT_KEY,
            env_u32("FORM_SUBMIT_LIMIT", 10),
            env_window_secs("FORM_SUBMIT_WINDOW_SECS", 60),
        )
        .with_message("Too many form submissions")
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_window_secs(name: &str, default: u64) -> Duration {
    Duration::from_secs(
        std::env::var(name)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_carry_defaults() {
        let cart = ActionPolicy::cart_update();
        assert_eq!(cart.key, CART_UPDATE_KEY);
        assert_eq!(cart.limit, 20);
        assert_eq!(cart.window, Duration::from_secs(60));
        assert!(cart.message.is_some());

        let payment = ActionPolicy::payment_attempt();
        assert_eq!(payment.key, PAYMENT_ATTEMPT_KEY);
        assert_eq!(payment.limit, 5);

        let form = ActionPolicy::form_submit();
        assert_eq!(form.key, FORM_SUBMIT_KEY);
        assert_eq!(form.limit, 10);
    }

    #[test]
    fn test_new_policy_has_no_custom_message() {
        let policy = ActionPolicy::new("newsletter", 3, Duration::from_secs(30));

        assert_eq!(policy.key, "newsletter");
        assert_eq!(policy.message, None);

        let policy = policy.with_message("Too many signups");
        assert_eq!(policy.message.as_deref(), Some("Too many signups"));
    }
}
