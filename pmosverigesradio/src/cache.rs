//! Response cache for slow-changing endpoints
//!
//! Program listings, episode listings, program details and categories are
//! cached by request key. Only successful responses are stored, so a failed
//! request is retried on the next navigation.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default lifetime of a cached response (24 hours)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 3600;

#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Cached response for `key`, if present and not expired
    async fn get(&self, key: &str) -> Option<Value>;

    async fn insert(&self, key: String, value: Value);
}

/// Build the cache key of a request
///
/// Parameters are sorted so the key does not depend on their order.
pub fn cache_key(endpoint: &str, params: &[(&str, String)]) -> String {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    format!("{}?{}", endpoint, pairs.join("&"))
}

#[derive(Debug, Clone)]
struct CachedResponse {
    value: Value,
    stored_at: Instant,
}

fn remove_expired(entries: &mut HashMap<String, CachedResponse>, key: &str, ttl: Duration) {
    if entries
        .get(key)
        .is_some_and(|entry| entry.stored_at.elapsed() >= ttl)
    {
        entries.remove(key);
    }
}

/// In-process cache with a fixed time-to-live
#[derive(Debug)]
pub struct MemoryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedResponse>>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.value.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired, unless replaced since the read lock was released
        remove_expired(&mut *self.entries.write().await, key, self.ttl);
        None
    }

    async fn insert(&self, key: String, value: Value) {
        self.entries.write().await.insert(
            key,
            CachedResponse {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}

/// Cache that stores nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

#[async_trait]
impl ResponseCache for NoCache {
    async fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn insert(&self, _key: String, _value: Value) {}
}
