//! Redis session store for server-side deployments.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use vitrine_core::ports::{SessionStore, StoreError};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// TTL applied to every stored key, so abandoned session state expires
    pub key_ttl: Option<Duration>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            key_ttl: None,
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            key_ttl: std::env::var("SESSION_KEY_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

/// Redis-backed session store.
///
/// Uses connection manager for automatic reconnection and pooling.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    config: RedisConfig,
}

impl RedisSessionStore {
    pub async fn new(config: RedisConfig) -> Result<Self, StoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| StoreError::Unavailable("Connection timed out".to_string()))?
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis session store");

        Ok(Self { conn, config })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, StoreError> {
        Self::new(RedisConfig::from_env()).await
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Redis GET failed");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();

        match self.config.key_ttl {
            Some(ttl) => {
                conn.set_ex::<_, _, ()>(key, value, ttl.as_secs())
                    .await
                    .map_err(|e| StoreError::Operation(e.to_string()))?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(|e| StoreError::Operation(e.to_string()))?;
            }
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn get_test_store(key_ttl: Option<Duration>) -> Option<RedisSessionStore> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
            key_ttl,
        };

        RedisSessionStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_store_set_get_remove() {
        let store = match get_test_store(None).await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        let key = "test_cart_count";
        store.set(key, "5").await.unwrap();
        assert_eq!(store.get(key).await, Some("5".to_string()));

        store.remove(key).await.unwrap();
        assert_eq!(store.get(key).await, None);
    }

    #[tokio::test]
    async fn test_redis_store_key_ttl() {
        let store = match get_test_store(Some(Duration::from_secs(1))).await {
            Some(s) => s,
            None => return,
        };

        let key = "test_cart_count_ttl";
        store.set(key, "2").await.unwrap();
        assert_eq!(store.get(key).await, Some("2".to_string()));

        // Wait for expiration
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(store.get(key).await, None);
    }
}
