//! Response cache for the fetcher.
//!
//! The fetcher only talks to the `CacheStore` trait so the backing store can
//! be swapped out. `MemoryStore` is the bundled implementation: bounded by
//! entry count (oldest insertion is evicted first) and optionally
//! time-scoped by a TTL.
//!
//! # Clock injection
//! Lookups and inserts take `now: DateTime<Utc>` rather than calling
//! `Utc::now()` so expiry is deterministic in tests.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// What the fetcher remembers for a URL: the decoded body, or `None` when
/// the request failed.
pub type CachedResponse = Option<Value>;

/// Backing store for memoized responses, keyed by URL.
pub trait CacheStore {
    /// Returns the live entry for `key`, dropping it first if it has expired.
    fn get(&mut self, key: &str, now: DateTime<Utc>) -> Option<CachedResponse>;

    fn put(&mut self, key: String, value: CachedResponse, now: DateTime<Utc>);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns `true` once an entry stored at `stored_at` is older than `ttl`.
///
/// Strictly greater than: an entry exactly `ttl` old is still served.
pub fn is_expired_at(stored_at: DateTime<Utc>, ttl: Duration, now: DateTime<Utc>) -> bool {
    now - stored_at > ttl
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Entry {
    value: CachedResponse,
    stored_at: DateTime<Utc>,
}

/// Bounded in-process store.
///
/// `max_entries == 0` disables caching entirely; `ttl == None` keeps
/// entries until they are evicted for space.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Entry>,
    order: VecDeque<String>,
    max_entries: usize,
    ttl: Option<Duration>,
}

impl MemoryStore {
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries,
            ttl,
        }
    }

    /// Store that never expires entries and holds up to `max_entries`.
    pub fn bounded(max_entries: usize) -> Self {
        Self::new(max_entries, None)
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(256, Some(Duration::minutes(10)))
    }
}

impl CacheStore for MemoryStore {
    fn get(&mut self, key: &str, now: DateTime<Utc>) -> Option<CachedResponse> {
        let entry = self.entries.get(key)?;
        if let Some(ttl) = self.ttl {
            if is_expired_at(entry.stored_at, ttl, now) {
                self.remove(key);
                return None;
            }
        }
        Some(entry.value.clone())
    }

    fn put(&mut self, key: String, value: CachedResponse, now: DateTime<Utc>) {
        if self.max_entries == 0 {
            return;
        }
        if self.entries.contains_key(&key) {
            self.remove(&key);
        }
        while self.entries.len() >= self.max_entries {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Entry { value, stored_at: now });
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
