//! Rate limiter implementations.

mod memory;
mod noop;

pub use memory::{InMemoryRateLimiter, RateLimitConfig};
pub use noop::NoopRateLimiter;
