//! Session store implementations.

mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use memory::InMemorySessionStore;

#[cfg(feature = "redis")]
pub use redis::{RedisConfig, RedisSessionStore};
