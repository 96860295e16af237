//! Per-session read-response cache
//!
//! Mirrors selected read responses for a session key with a TTL, and is
//! invalidated opportunistically on writes. There is no consistency
//! guarantee between cache and database beyond the TTL.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// Response cache shared across requests
#[derive(Clone)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Cache key for a session-scoped resource read
    pub fn key(session: &str, resource: &str) -> String {
        format!("{session}:{resource}")
    }

    /// Get a cached response if present and not expired
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Store a response
    pub async fn put(&self, key: String, value: Value) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop every entry whose key starts with `prefix`
    ///
    /// Called after writes touching the matching resource; best effort.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.write().await;
        entries.retain(|k, _| !k.starts_with(prefix));
    }

    /// Drop expired entries (periodic maintenance)
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.expires_at > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let key = ResponseCache::key("sess-1", "menu");
        cache.put(key.clone(), json!({"items": []})).await;
        assert_eq!(cache.get(&key).await, Some(json!({"items": []})));
    }

    #[tokio::test]
    async fn test_expired_entry_is_miss() {
        let cache = ResponseCache::new(Duration::from_millis(5));
        cache.put("k".into(), json!(1)).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_invalidate_prefix() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("sess-1:menu".into(), json!(1)).await;
        cache.put("sess-1:tables".into(), json!(2)).await;
        cache.put("sess-2:menu".into(), json!(3)).await;

        cache.invalidate_prefix("sess-1:").await;

        assert_eq!(cache.get("sess-1:menu").await, None);
        assert_eq!(cache.get("sess-1:tables").await, None);
        assert_eq!(cache.get("sess-2:menu").await, Some(json!(3)));
    }
}
