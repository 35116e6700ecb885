use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, trace};

/// The cache service the read and write paths share.
///
/// Readers call `get`/`set`, writers call `invalidate`. Implementations must
/// guarantee that once `invalidate` returns, `get` for that tag misses until
/// the next `set` - that ordering is what makes a read issued after a
/// successful mutation see fresh data.
pub trait TagCache: Send + Sync {
    /// Fetch the live payload under a tag, if one exists and is still fresh.
    fn get(&self, tag: &str) -> Option<Value>;

    /// Store a payload under a tag, replacing whatever was there.
    fn set(&self, tag: &str, payload: Value, ttl: Duration);

    /// Mark everything under a tag stale, regardless of remaining TTL.
    /// Safe to call redundantly and for tags that were never cached.
    fn invalidate(&self, tag: &str);
}

/// One stored payload with its freshness bookkeeping.
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
    ttl: Duration,
    stale: bool,
}

impl CacheEntry {
    fn new(payload: Value, ttl: Duration) -> Self {
        Self {
            payload,
            stored_at: Instant::now(),
            ttl,
            stale: false,
        }
    }

    /// Stale once explicitly invalidated or once the TTL has elapsed.
    /// Staleness is monotonic: an entry never becomes fresh again, it only
    /// gets replaced by a new one.
    fn is_stale(&self, now: Instant) -> bool {
        self.stale || now.duration_since(self.stored_at) >= self.ttl
    }
}

/// In-memory tag cache: one live entry per tag behind a mutex.
///
/// All operations are per-tag replace/mark-stale under the lock, so no
/// partially written entry is ever observable. There is no in-flight request
/// de-duplication - two concurrent misses for the same tag both re-fetch,
/// which costs a request but never correctness.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TagCache for MemoryCache {
    fn get(&self, tag: &str) -> Option<Value> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        match entries.get(tag) {
            Some(entry) if !entry.is_stale(Instant::now()) => {
                trace!("cache hit for {}", tag);
                Some(entry.payload.clone())
            }
            Some(_) => {
                trace!("cache entry for {} is stale", tag);
                None
            }
            None => None,
        }
    }

    fn set(&self, tag: &str, payload: Value, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        debug!("caching {} for {}s", tag, ttl.as_secs());
        entries.insert(tag.to_string(), CacheEntry::new(payload, ttl));
    }

    fn invalidate(&self, tag: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(entry) = entries.get_mut(tag) {
            debug!("invalidating {}", tag);
            entry.stale = true;
        }
    }
}
