//! Time-bounded snapshot cache.
//!
//! Entries are keyed by source identity and hold a shared snapshot together
//! with its load instant. Expiry is only checked on access; the caller owns
//! the cache and decides when to refresh.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug)]
struct CacheEntry<T> {
    value: Arc<T>,
    loaded_at: Instant,
}

#[derive(Debug)]
pub struct SnapshotCache<T> {
    ttl: Duration,
    entries: HashMap<String, CacheEntry<T>>,
}

impl<T> SnapshotCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True when `key` holds a snapshot younger than the TTL.
    pub fn is_fresh(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.loaded_at.elapsed() < self.ttl)
    }

    /// The cached snapshot for `key`, loading it when absent or expired.
    ///
    /// A failed load leaves any previous entry in place.
    pub fn get_or_load<F, E>(&mut self, key: &str, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if self.is_fresh(key)
            && let Some(entry) = self.entries.get(key)
        {
            debug!(key, "snapshot cache hit");
            return Ok(Arc::clone(&entry.value));
        }

        let value = Arc::new(load()?);
        debug!(key, "snapshot cache loaded");
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: Arc::clone(&value),
                loaded_at: Instant::now(),
            },
        );
        Ok(value)
    }

    /// Drop the snapshot for `key`; returns whether one was cached.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Discard the snapshot for `key` and load it again.
    pub fn refresh<F, E>(&mut self, key: &str, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.invalidate(key);
        self.get_or_load(key, load)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn counting_load(counter: &mut u32) -> Result<u32, Infallible> {
        *counter += 1;
        Ok(*counter)
    }

    #[test]
    fn fresh_entries_are_reused() {
        let mut cache = SnapshotCache::new(Duration::from_secs(3600));
        let mut loads = 0;
        let first = cache.get_or_load("a.csv", || counting_load(&mut loads)).unwrap();
        let second = cache.get_or_load("a.csv", || counting_load(&mut loads)).unwrap();
        assert_eq!(loads, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_fresh("a.csv"));
    }

    #[test]
    fn expired_entries_reload() {
        let mut cache = SnapshotCache::new(Duration::ZERO);
        let mut loads = 0;
        cache.get_or_load("a.csv", || counting_load(&mut loads)).unwrap();
        let value = cache.get_or_load("a.csv", || counting_load(&mut loads)).unwrap();
        assert_eq!(loads, 2);
        assert_eq!(*value, 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn refresh_and_invalidate() {
        let mut cache = SnapshotCache::new(Duration::from_secs(3600));
        let mut loads = 0;
        cache.get_or_load("a.csv", || counting_load(&mut loads)).unwrap();
        let refreshed = cache.refresh("a.csv", || counting_load(&mut loads)).unwrap();
        assert_eq!(*refreshed, 2);
        assert!(cache.invalidate("a.csv"));
        assert!(!cache.invalidate("a.csv"));
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_entry() {
        let mut cache = SnapshotCache::new(Duration::ZERO);
        cache
            .get_or_load("a.csv", || Ok::<_, String>(1))
            .unwrap();
        let err = cache
            .get_or_load("a.csv", || Err::<u32, _>("offline".to_string()))
            .unwrap_err();
        assert_eq!(err, "offline");
        assert_eq!(cache.len(), 1);
    }
}
