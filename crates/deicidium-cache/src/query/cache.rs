//! Memoised async fetches keyed by an explicit key.
//!
//! Each key maps to a slot holding a `tokio::sync::OnceCell`. The first caller
//! runs the fetch; concurrent callers for the same key wait on the same cell.
//! A completed slot older than `stale_after` is swapped for an empty one on the
//! next lookup, and inserting a new key sweeps out stale and abandoned slots.

use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::OnceCell;

/// A fetched value and the time it completed
#[derive(Debug)]
struct Stamped<V> {
    value: V,
    fetched_at: Instant,
}

impl<V> Stamped<V> {
    fn now(value: V) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }
}

type Slot<V> = Arc<OnceCell<Stamped<V>>>;

/// Concurrent query cache
///
/// Uses `DashMap` for the key -> slot index. Map guards are never held across
/// an await point.
pub struct QueryCache<K, V> {
    slots: DashMap<K, Slot<V>>,
    stale_after: Option<Duration>,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Create a cache; `None` means completed entries never go stale
    pub fn new(stale_after: Option<Duration>) -> Self {
        Self {
            slots: DashMap::new(),
            stale_after,
        }
    }

    /// Create a cache whose entries never go stale
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Staleness window of this cache
    pub fn stale_after(&self) -> Option<Duration> {
        self.stale_after
    }

    fn is_stale(&self, slot: &Slot<V>) -> bool {
        match (slot.get(), self.stale_after) {
            (Some(stamped), Some(window)) => stamped.fetched_at.elapsed() >= window,
            _ => false,
        }
    }

    /// Current slot for `key`, replacing a stale one
    fn slot(&self, key: &K) -> Slot<V> {
        if !self.slots.contains_key(key) {
            self.evict_stale();
        }

        let mut entry = self
            .slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()));

        if self.is_stale(entry.value()) {
            tracing::trace!(?key, "Query cache entry stale");
            *entry = Arc::new(OnceCell::new());
        }

        Arc::clone(entry.value())
    }

    /// Drop stale slots and empty slots nobody is waiting on
    ///
    /// An empty slot held only by the map is what a failed fetch leaves behind.
    /// Slots with a fetch in flight are kept.
    pub fn evict_stale(&self) {
        let before = self.slots.len();
        self.slots.retain(|_, slot| {
            let in_flight = Arc::strong_count(slot) > 1;
            in_flight || (slot.initialized() && !self.is_stale(slot))
        });

        let evicted = before.saturating_sub(self.slots.len());
        if evicted > 0 {
            tracing::debug!(evicted, "Query cache entries evicted");
        }
    }

    /// Return the fresh cached value for `key`, running `fetch` on a miss
    ///
    /// Concurrent calls with an equal key share one `fetch`.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let slot = self.slot(&key);
        if slot.initialized() {
            tracing::trace!(?key, "Query cache hit");
        }

        let stamped = slot
            .get_or_init(|| async move {
                tracing::debug!(?key, "Query cache miss");
                Stamped::now(fetch().await)
            })
            .await;

        stamped.value.clone()
    }

    /// Like [`get_or_fetch`](Self::get_or_fetch) but for fallible fetches
    ///
    /// Errors are returned to the caller that ran the fetch and are not cached;
    /// the next call for the key fetches again.
    pub async fn try_get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot(&key);

        let stamped = slot
            .get_or_try_init(|| async move {
                tracing::debug!(?key, "Query cache miss");
                fetch().await.map(Stamped::now)
            })
            .await?;

        Ok(stamped.value.clone())
    }

    /// Fresh cached value for `key`, without fetching
    pub fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.get(key).map(|entry| Arc::clone(entry.value()))?;
        if self.is_stale(&slot) {
            return None;
        }
        slot.get().map(|stamped| stamped.value.clone())
    }

    /// Number of keys currently tracked (including in-flight ones)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K, V> Default for QueryCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<K, V> Debug for QueryCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.slots.len())
            .field("stale_after", &self.stale_after)
            .finish()
    }
}
