//! # Vitrine Infrastructure
//!
//! Concrete implementations of the ports defined in `vitrine-core`:
//! session stores and rate limiters.
//!
//! ## Feature Flags
//!
//! - `redis` (default) - Redis-backed session store for server deployments

pub mod rate_limit;
pub mod session_store;

// Re-exports - In-Memory
pub use rate_limit::{InMemoryRateLimiter, NoopRateLimiter, RateLimitConfig};
pub use session_store::InMemorySessionStore;

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use session_store::{RedisConfig, RedisSessionStore};
