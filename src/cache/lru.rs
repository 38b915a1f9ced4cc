use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

/// Bounded key -> serialized-reply store shared by all client sessions.
///
/// Wraps an [`LruCache`] behind a single mutex: every operation, including
/// the recency bump a `get` performs, is a mutation and runs under the lock.
/// The lock is held only for the map operation itself, never across I/O.
pub struct ResponseCache {
    entries: Mutex<LruCache<String, String>>,
}

impl ResponseCache {
    /// Creates a cache holding at most `max_items` entries (minimum 1).
    pub fn new(max_items: usize) -> Self {
        let capacity = NonZeroUsize::new(max_items.max(1)).unwrap();
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the stored reply and marks the key most-recently-used.
    /// A miss has no side effect.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        entries.get(key).cloned()
    }

    /// Inserts or overwrites, marking the key most-recently-used. When the
    /// insert pushes the cache past its bound, the least-recently-used entry
    /// is evicted.
    pub fn put(&self, key: String, value: String) {
        let mut entries = self.entries.lock().unwrap();
        entries.put(key, value);
    }

    /// Looks up a key without touching recency. Diagnostic accessor used by
    /// tests; the session loop always goes through [`ResponseCache::get`].
    pub fn peek(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        entries.peek(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
