//! Bounded text-keyed memoization.
//!
//! Three hot paths memoize by input text: grammar compilation, specificity
//! scoring and store-brand classification. Descriptions repeat heavily inside
//! a feed but the key space is unbounded across feeds, so each cache holds the
//! most recently used 1024 entries and evicts the stalest on overflow.

use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) const DEFAULT_CAPACITY: usize = 1024;

/// A thread-safe least-recently-used map from text keys to cloneable values.
pub(crate) struct TextCache<V> {
    inner: Mutex<Inner<V>>,
    capacity: usize,
}

struct Inner<V> {
    slots: HashMap<String, Slot<V>>,
    clock: u64,
}

struct Slot<V> {
    value: V,
    last_used: u64,
}

impl<V: Clone> TextCache<V> {
    pub fn new(capacity: usize) -> Self {
        TextCache { inner: Mutex::new(Inner { slots: HashMap::new(), clock: 0 }), capacity: capacity.max(1) }
    }

    /// Look `key` up, computing and storing `fill()` on a miss.
    ///
    /// `fill` runs under the lock, so a key is computed at most once even
    /// under concurrent lookups.
    pub fn get_or_insert_with(&self, key: &str, fill: impl FnOnce() -> V) -> V {
        // A poisoned lock only means some other thread panicked mid-lookup;
        // the map itself is still coherent.
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let inner = &mut *guard;

        inner.clock += 1;
        let stamp = inner.clock;

        if let Some(slot) = inner.slots.get_mut(key) {
            slot.last_used = stamp;
            return slot.value.clone();
        }

        let value = fill();
        if inner.slots.len() >= self.capacity {
            // Linear scan; the capacity is small and misses are rare once the
            // cache is warm.
            if let Some(stalest) = inner
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(key, _)| key.clone())
            {
                inner.slots.remove(&stalest);
            }
        }
        inner.slots.insert(key.to_owned(), Slot { value: value.clone(), last_used: stamp });
        value
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).slots.len()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).slots.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn computes_each_key_once() {
        let cache: TextCache<usize> = TextCache::new(8);
        let calls = AtomicUsize::new(0);

        let fill = || calls.fetch_add(1, Ordering::SeqCst) + 1;
        assert_eq!(cache.get_or_insert_with("a", fill), 1);
        assert_eq!(cache.get_or_insert_with("a", fill), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn evicts_the_least_recently_used_key() {
        let cache: TextCache<usize> = TextCache::new(2);
        cache.get_or_insert_with("a", || 1);
        cache.get_or_insert_with("b", || 2);

        // Touch "a" so "b" becomes the stalest entry.
        cache.get_or_insert_with("a", || 9);
        cache.get_or_insert_with("c", || 3);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn capacity_of_zero_still_holds_one_entry() {
        let cache: TextCache<usize> = TextCache::new(0);
        assert_eq!(cache.get_or_insert_with("a", || 1), 1);
        assert_eq!(cache.get_or_insert_with("b", || 2), 2);
        assert_eq!(cache.len(), 1);
    }
}
