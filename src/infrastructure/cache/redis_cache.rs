//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for report payloads.
///
/// Holds one `ConnectionManager`, cloned per call. Every operation fails open:
/// a Redis error is logged and reads as a miss, so reports fall back to the
/// database.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
}

const KEY_PREFIX: &str = "store-directory:";

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when [`CacheService::set`] is called with
    ///   `ttl_seconds = None`; controlled via `CACHE_TTL_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::ConnectionError(format!("Invalid Redis URL: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Failed to connect to Redis: {e}")))?;

        manager
            .clone()
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {e}")))?;

        info!(default_ttl_seconds, "Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
        })
    }

    /// Namespaces `key` so several deployments can share one Redis.
    fn build_key(&self, key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        let cached = conn
            .get::<_, Option<String>>(self.build_key(key))
            .await
            .unwrap_or_else(|e| {
                error!(key, error = %e, "Redis GET failed; treating as miss");
                None
            });

        let outcome = if cached.is_some() { "hit" } else { "miss" };
        metrics::counter!("report_cache_lookups_total", "outcome" => outcome).increment(1);
        debug!(key, outcome, "Report cache lookup");

        Ok(cached)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> CacheResult<()> {
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);

        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.build_key(key), value, ttl_seconds)
            .await
        {
            warn!(key, error = %e, "Redis SET failed; report stays uncached");
        } else {
            debug!(key, ttl_seconds, "Report cached");
        }

        Ok(())
    }

    async fn invalidate(&self, keys: &[String]) -> CacheResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let full_keys: Vec<String> = keys.iter().map(|k| self.build_key(k)).collect();
        let mut conn = self.client.clone();

        match conn.del::<_, i64>(&full_keys).await {
            Ok(deleted) => debug!(?keys, deleted, "Reports invalidated"),
            // Stale reports expire with their TTL.
            Err(e) => warn!(?keys, error = %e, "Redis DEL failed"),
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
