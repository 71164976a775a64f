//! Shared counter store backing rate-limit and budget admission.
//!
//! `Cache` is the abstraction spec.md §4.5 asks for: `get`/`set` for plain
//! reads and writes, plus an atomic `incr_ex(key, delta, ttl)` that both
//! bumps a counter and (re)arms its expiry in one step, which is what admission
//! needs to reserve an RPM slot without a separate read-then-write race.
//!
//! `InMemoryCache` is the default, process-local implementation (visible to
//! one replica only — fine for a single gateway instance or for fronting the
//! shared store as an optimization). `RedisCache`, behind the `redis`
//! feature, is the one actually "visible to all replicas" as spec.md
//! requires for a multi-process deployment.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counter store used for rate-limit windows and budget spend tracking.
///
/// Implementations must make `incr_ex` atomic: concurrent callers
/// incrementing the same key must each observe a distinct, correctly
/// ordered post-increment value, with the TTL taking effect from the first
/// write that creates the key.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Current value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Option<i64>;

    /// Overwrite `key` with `value`, expiring after `ttl`.
    async fn set(&self, key: &str, value: i64, ttl: Duration);

    /// Atomically add `delta` to `key` (creating it at `delta` if absent)
    /// and return the post-increment value. Resets the TTL to `ttl` only
    /// when the key is created by this call; an existing key keeps its
    /// current expiry, matching a sliding per-window counter rather than a
    /// sliding-per-write one.
    async fn incr_ex(&self, key: &str, delta: i64, ttl: Duration) -> i64;
}

struct Cell {
    value: i64,
    expires_at: Instant,
}

/// Per-key `parking_lot::Mutex` sharding: admission needs the
/// post-increment value atomically visible alongside a TTL write, which
/// plain atomics can't express without a second coordinated field, so each
/// key gets its own lock rather than a single global one.
#[derive(Default)]
pub struct InMemoryCache {
    cells: Arc<dashmap::DashMap<String, Arc<Mutex<Cell>>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell_for(&self, key: &str) -> Arc<Mutex<Cell>> {
        self.cells
            .entry(key.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(Cell {
                    value: 0,
                    expires_at: Instant::now(),
                }))
            })
            .clone()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<i64> {
        let cell = self.cells.get(key)?;
        let guard = cell.lock();
        if guard.expires_at <= Instant::now() {
            None
        } else {
            Some(guard.value)
        }
    }

    async fn set(&self, key: &str, value: i64, ttl: Duration) {
        let cell = self.cell_for(key);
        let mut guard = cell.lock();
        guard.value = value;
        guard.expires_at = Instant::now() + ttl;
    }

    async fn incr_ex(&self, key: &str, delta: i64, ttl: Duration) -> i64 {
        let cell = self.cell_for(key);
        let mut guard = cell.lock();
        let now = Instant::now();
        if guard.expires_at <= now {
            // Expired or brand new: this write defines the window.
            guard.value = delta;
            guard.expires_at = now + ttl;
        } else {
            guard.value += delta;
        }
        guard.value
    }
}

#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;

#[cfg(feature = "redis")]
mod redis_cache {
    use super::*;
    use redis::AsyncCommands;

    /// Redis-backed `Cache`. `incr_ex` is a small Lua script so the
    /// increment and the expiry write commit as one atomic server-side
    /// operation (a plain `INCRBY` + `EXPIRE` pair would not be atomic
    /// across two round trips).
    pub struct RedisCache {
        client: redis::Client,
    }

    const INCR_EX_SCRIPT: &str = r#"
        local v = redis.call("INCRBY", KEYS[1], ARGV[1])
        if tonumber(redis.call("TTL", KEYS[1])) < 0 then
            redis.call("EXPIRE", KEYS[1], ARGV[2])
        end
        return v
    "#;

    impl RedisCache {
        pub fn new(redis_url: &str) -> crate::utils::error::Result<Self> {
            let client = redis::Client::open(redis_url)?;
            Ok(Self { client })
        }

        async fn connection(
            &self,
        ) -> crate::utils::error::Result<redis::aio::MultiplexedConnection> {
            Ok(self.client.get_multiplexed_async_connection().await?)
        }
    }

    #[async_trait]
    impl Cache for RedisCache {
        async fn get(&self, key: &str) -> Option<i64> {
            let mut conn = self.connection().await.ok()?;
            conn.get(key).await.ok()
        }

        async fn set(&self, key: &str, value: i64, ttl: Duration) {
            if let Ok(mut conn) = self.connection().await {
                let _: Result<(), _> = conn.set_ex(key, value, ttl.as_secs()).await;
            }
        }

        async fn incr_ex(&self, key: &str, delta: i64, ttl: Duration) -> i64 {
            let Ok(mut conn) = self.connection().await else {
                return delta;
            };
            redis::Script::new(INCR_EX_SCRIPT)
                .key(key)
                .arg(delta)
                .arg(ttl.as_secs())
                .invoke_async(&mut conn)
                .await
                .unwrap_or(delta)
        }
    }
}

/// Test-only in-process cache, exposed for admission unit tests elsewhere in
/// the crate that want a fresh, isolated store per test.
#[allow(dead_code)]
pub fn in_memory() -> Arc<dyn Cache> {
    Arc::new(InMemoryCache::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn incr_ex_creates_and_accumulates() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.incr_ex("k", 1, Duration::from_secs(60)).await, 1);
        assert_eq!(cache.incr_ex("k", 1, Duration::from_secs(60)).await, 2);
        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn incr_ex_resets_after_ttl_expires() {
        let cache = InMemoryCache::new();
        cache.incr_ex("k", 5, Duration::from_millis(10)).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.incr_ex("k", 1, Duration::from_secs(60)).await, 1);
    }

    #[tokio::test]
    async fn concurrent_incr_ex_is_atomic() {
        let cache = Arc::new(InMemoryCache::new());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.incr_ex("hot", 1, Duration::from_secs(60)).await
            }));
        }
        let mut seen = Vec::new();
        for h in handles {
            seen.push(h.await.unwrap());
        }
        seen.sort();
        assert_eq!(seen, (1..=50).collect::<Vec<i64>>());
    }
}
