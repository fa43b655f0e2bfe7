//! Session store port - the persisted key-value surface behind the client
//! state (browser local storage, Redis, or process memory depending on the
//! deployment).

use async_trait::async_trait;

/// Session store trait - abstraction over per-visitor persistence backends.
///
/// Values are plain strings; callers own the encoding. Reads are infallible
/// by contract: an unreachable backend reads as "nothing persisted", because
/// nothing in the client state may fail just because storage is gone.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the value stored under a key, if any.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value under a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
