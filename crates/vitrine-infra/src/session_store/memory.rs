//! In-memory session store - used in tests and ephemeral deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use vitrine_core::ports::{SessionStore, StoreError};

/// In-memory session store backed by a `HashMap` behind an async `RwLock`.
///
/// State is private to the process and lost on restart, which matches the
/// per-visitor scope of the browser storage it stands in for.
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
