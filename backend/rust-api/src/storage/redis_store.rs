use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;

use super::KeyValueStore;
use crate::metrics::track_store_operation;
use crate::utils::retry::{retry_async_with_config, RetryConfig};

pub struct RedisStore {
    redis: ConnectionManager,
}

impl RedisStore {
    /// Connects and verifies the server answers PING before returning.
    pub async fn connect(redis_uri: &str) -> Result<Self> {
        let client = redis::Client::open(redis_uri).context("Invalid Redis URI")?;

        tracing::info!("Attempting to connect to Redis...");

        let redis = tokio::time::timeout(
            Duration::from_secs(30),
            ConnectionManager::new(client),
        )
        .await
        .map_err(|_| anyhow::anyhow!("Redis connection timeout after 30s"))??;

        let store = Self { redis };
        tokio::time::timeout(Duration::from_secs(5), store.ping())
            .await
            .map_err(|_| anyhow::anyhow!("Redis PING timeout after 5s"))??;

        tracing::info!("Redis connection established successfully");
        Ok(store)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        track_store_operation("get", self.backend_name(), async {
            retry_async_with_config(RetryConfig::default(), || async {
                let mut conn = self.redis.clone();
                redis::cmd("GET")
                    .arg(key)
                    .query_async::<Option<String>>(&mut conn)
                    .await
            })
            .await
            .with_context(|| format!("Failed to read {} from Redis", key))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        track_store_operation("set", self.backend_name(), async {
            retry_async_with_config(RetryConfig::aggressive(), || async {
                let mut conn = self.redis.clone();
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .query_async::<()>(&mut conn)
                    .await
            })
            .await
            .with_context(|| format!("Failed to write {} to Redis", key))
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.redis.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .context("Redis PING failed")?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
