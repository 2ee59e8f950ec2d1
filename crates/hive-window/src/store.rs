//! Window storage backends
//!
//! The window store holds, per sector, an ordered list of recent state
//! labels, newest first. [`RedisWindowStore`] is the production backend;
//! [`MemoryWindowStore`] mirrors its observable semantics for tests and
//! local runs.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use hive_common::{HiveError, Result, WINDOW_CAPACITY, WINDOW_TTL_SECS};

/// Redis key for a sector's window
pub fn window_key(sector: &str) -> String {
    format!("hive:{}", sector)
}

/// Trait for sector window storage backends
#[async_trait]
pub trait WindowStore: Send + Sync {
    /// Record a state label in the sector's window
    ///
    /// Prepends the label, re-truncates the window to capacity, and resets
    /// the whole-key TTL, as one unit ("touch" semantics: every write keeps
    /// the sector alive for another full TTL).
    async fn record(&self, sector: &str, state: &str) -> Result<()>;

    /// Read up to `span` newest entries of the sector's window
    ///
    /// An absent or expired window reads as an empty vec, not an error.
    async fn recent(&self, sector: &str, span: usize) -> Result<Vec<String>>;

    /// Current window length for a sector (0 when absent or expired)
    async fn length(&self, sector: &str) -> Result<usize>;
}

/// Redis-backed window store
///
/// Holds a multiplexed connection shared by all request tasks, reconnecting
/// lazily if it is lost. The three write sub-operations are pipelined under
/// MULTI/EXEC so a window is never observed over-length or without a fresh
/// expiry.
pub struct RedisWindowStore {
    /// Redis client
    client: Client,
    /// Shared connection, re-established on demand
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
}

impl RedisWindowStore {
    /// Connect to Redis eagerly; a dead store fails construction
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| HiveError::Config(format!("Failed to create Redis client: {}", e)))?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| HiveError::Storage(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(Some(connection))),
        })
    }

    /// Get the shared connection, reconnecting if necessary
    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        let guard = self.connection.read().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }
        drop(guard);

        let mut guard = self.connection.write().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| HiveError::Storage(format!("Failed to reconnect to Redis: {}", e)))?;

        *guard = Some(connection.clone());
        Ok(connection)
    }
}

#[async_trait]
impl WindowStore for RedisWindowStore {
    #[instrument(skip(self))]
    async fn record(&self, sector: &str, state: &str) -> Result<()> {
        let key = window_key(sector);
        let mut conn = self.get_connection().await?;

        redis::pipe()
            .atomic()
            .cmd("LPUSH")
            .arg(&key)
            .arg(state)
            .ignore()
            .cmd("LTRIM")
            .arg(&key)
            .arg(0)
            .arg((WINDOW_CAPACITY - 1) as isize)
            .ignore()
            .cmd("EXPIRE")
            .arg(&key)
            .arg(WINDOW_TTL_SECS)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| {
                warn!(key = %key, "Window write failed: {}", e);
                HiveError::Storage(format!("Redis window write failed: {}", e))
            })?;

        debug!(key = %key, state, "Recorded window entry");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent(&self, sector: &str, span: usize) -> Result<Vec<String>> {
        if span == 0 {
            return Ok(Vec::new());
        }

        let key = window_key(sector);
        let mut conn = self.get_connection().await?;

        let entries: Vec<String> = conn
            .lrange(&key, 0, span as isize - 1)
            .await
            .map_err(|e| {
                warn!(key = %key, "Window read failed: {}", e);
                HiveError::Storage(format!("Redis window read failed: {}", e))
            })?;

        debug!(key = %key, count = entries.len(), "Read window span");
        Ok(entries)
    }

    #[instrument(skip(self))]
    async fn length(&self, sector: &str) -> Result<usize> {
        let key = window_key(sector);
        let mut conn = self.get_connection().await?;

        let len: usize = conn
            .llen(&key)
            .await
            .map_err(|e| HiveError::Storage(format!("Redis LLEN failed: {}", e)))?;

        Ok(len)
    }
}

/// A single in-memory sector window
struct MemoryWindow {
    entries: VecDeque<String>,
    touched: Instant,
}

/// In-memory window store
///
/// Mirrors the Redis semantics: bounded list per sector, whole-key expiry
/// measured from the last write. Expiry is evaluated at read time against
/// the tokio clock, so tests can drive it with `tokio::time::advance`.
pub struct MemoryWindowStore {
    windows: DashMap<String, MemoryWindow>,
    capacity: usize,
    ttl: Duration,
}

impl MemoryWindowStore {
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
            capacity: WINDOW_CAPACITY,
            ttl: Duration::from_secs(WINDOW_TTL_SECS),
        }
    }

    /// Override the capacity (tests)
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Override the TTL (tests)
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn is_expired(&self, window: &MemoryWindow) -> bool {
        window.touched.elapsed() >= self.ttl
    }
}

impl Default for MemoryWindowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WindowStore for MemoryWindowStore {
    async fn record(&self, sector: &str, state: &str) -> Result<()> {
        let key = window_key(sector);
        let mut window = self.windows.entry(key).or_insert_with(|| MemoryWindow {
            entries: VecDeque::new(),
            touched: Instant::now(),
        });

        // An expired key would be gone in Redis; a write starts it fresh
        if self.is_expired(&window) {
            window.entries.clear();
        }

        window.entries.push_front(state.to_string());
        window.entries.truncate(self.capacity);
        window.touched = Instant::now();
        Ok(())
    }

    async fn recent(&self, sector: &str, span: usize) -> Result<Vec<String>> {
        let key = window_key(sector);
        match self.windows.get(&key) {
            Some(window) if !self.is_expired(&window) => {
                Ok(window.entries.iter().take(span).cloned().collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn length(&self, sector: &str) -> Result<usize> {
        let key = window_key(sector);
        match self.windows.get(&key) {
            Some(window) if !self.is_expired(&window) => Ok(window.entries.len()),
            _ => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_common::{ASSESSMENT_SPAN, PAIN_STATE};

    #[test]
    fn test_window_key_format() {
        assert_eq!(window_key("general"), "hive:general");
        assert_eq!(window_key("s1"), "hive:s1");
    }

    #[tokio::test]
    async fn test_round_trip_preserves_entries() {
        let store = MemoryWindowStore::new();
        for _ in 0..7 {
            store.record("s1", PAIN_STATE).await.unwrap();
        }

        let entries = store.recent("s1", ASSESSMENT_SPAN).await.unwrap();
        assert_eq!(entries.len(), 7);
        assert!(entries.iter().all(|e| e == PAIN_STATE));
        assert_eq!(store.length("s1").await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_newest_first_order() {
        let store = MemoryWindowStore::new();
        store.record("s1", "FIRST").await.unwrap();
        store.record("s1", "SECOND").await.unwrap();

        let entries = store.recent("s1", ASSESSMENT_SPAN).await.unwrap();
        assert_eq!(entries, vec!["SECOND".to_string(), "FIRST".to_string()]);
    }

    #[tokio::test]
    async fn test_capacity_never_exceeded() {
        let store = MemoryWindowStore::new();
        for _ in 0..150 {
            store.record("s1", PAIN_STATE).await.unwrap();
        }

        assert_eq!(store.length("s1").await.unwrap(), WINDOW_CAPACITY);
    }

    #[tokio::test]
    async fn test_read_span_is_limited() {
        let store = MemoryWindowStore::new();
        for _ in 0..80 {
            store.record("s1", PAIN_STATE).await.unwrap();
        }

        let entries = store.recent("s1", ASSESSMENT_SPAN).await.unwrap();
        assert_eq!(entries.len(), ASSESSMENT_SPAN);
    }

    #[tokio::test]
    async fn test_absent_sector_reads_empty() {
        let store = MemoryWindowStore::new();
        let entries = store.recent("nowhere", ASSESSMENT_SPAN).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_sectors_are_isolated() {
        let store = MemoryWindowStore::new();
        store.record("s1", PAIN_STATE).await.unwrap();

        assert_eq!(store.length("s2").await.unwrap(), 0);
        assert_eq!(store.length("s1").await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_expires_after_ttl() {
        let store = MemoryWindowStore::new();
        store.record("s1", PAIN_STATE).await.unwrap();

        tokio::time::advance(Duration::from_secs(WINDOW_TTL_SECS + 1)).await;

        let entries = store.recent("s1", ASSESSMENT_SPAN).await.unwrap();
        assert!(entries.is_empty());
        assert_eq!(store.length("s1").await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_resets_ttl() {
        let store = MemoryWindowStore::new();
        store.record("s1", PAIN_STATE).await.unwrap();

        // Touch the window just before expiry; it must live a full TTL again
        tokio::time::advance(Duration::from_secs(WINDOW_TTL_SECS - 10)).await;
        store.record("s1", PAIN_STATE).await.unwrap();

        tokio::time::advance(Duration::from_secs(WINDOW_TTL_SECS - 10)).await;
        assert_eq!(store.length("s1").await.unwrap(), 2);

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(store.length("s1").await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_after_expiry_starts_fresh() {
        let store = MemoryWindowStore::new();
        for _ in 0..5 {
            store.record("s1", PAIN_STATE).await.unwrap();
        }

        tokio::time::advance(Duration::from_secs(WINDOW_TTL_SECS + 1)).await;
        store.record("s1", PAIN_STATE).await.unwrap();

        assert_eq!(store.length("s1").await.unwrap(), 1);
    }
}
