// src/upstream/place_cache.rs
use crate::upstream::models::PlaceMatch;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How resolved places are retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Keep every resolution for the life of the process.
    Unbounded,
    /// Keep at most `capacity` entries, least recently used first out,
    /// optionally expiring entries older than `ttl`.
    Lru {
        capacity: NonZeroUsize,
        ttl: Option<Duration>,
    },
}

impl EvictionPolicy {
    /// A capacity of zero or none means unbounded; a TTL only applies to LRU.
    pub fn from_settings(capacity: Option<usize>, ttl: Option<Duration>) -> Self {
        match capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => EvictionPolicy::Lru { capacity, ttl },
            None => EvictionPolicy::Unbounded,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    place: PlaceMatch,
    inserted_at: Instant,
}

enum Store {
    Unbounded(HashMap<String, Entry>),
    Lru {
        cache: LruCache<String, Entry>,
        ttl: Option<Duration>,
    },
}

/// Process-wide query → place resolution cache, keyed by the raw query text.
pub struct PlaceCache {
    store: Mutex<Store>,
}

impl PlaceCache {
    pub fn new(policy: EvictionPolicy) -> Self {
        let store = match policy {
            EvictionPolicy::Unbounded => Store::Unbounded(HashMap::new()),
            EvictionPolicy::Lru { capacity, ttl } => Store::Lru {
                cache: LruCache::new(capacity),
                ttl,
            },
        };
        Self {
            store: Mutex::new(store),
        }
    }

    pub fn get(&self, query: &str) -> Option<PlaceMatch> {
        let mut store = self.store.lock().unwrap_or_else(|p| p.into_inner());
        match &mut *store {
            Store::Unbounded(map) => map.get(query).map(|e| e.place.clone()),
            Store::Lru { cache, ttl } => {
                let expired = match (cache.get(query), ttl) {
                    (Some(entry), Some(ttl)) => entry.inserted_at.elapsed() >= *ttl,
                    (Some(entry), None) => return Some(entry.place.clone()),
                    (None, _) => return None,
                };
                if expired {
                    cache.pop(query);
                    return None;
                }
                cache.peek(query).map(|e| e.place.clone())
            }
        }
    }

    pub fn insert(&self, query: &str, place: PlaceMatch) {
        let entry = Entry {
            place,
            inserted_at: Instant::now(),
        };
        let mut store = self.store.lock().unwrap_or_else(|p| p.into_inner());
        match &mut *store {
            Store::Unbounded(map) => {
                map.insert(query.to_string(), entry);
            }
            Store::Lru { cache, .. } => {
                cache.put(query.to_string(), entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        let store = self.store.lock().unwrap_or_else(|p| p.into_inner());
        match &*store {
            Store::Unbounded(map) => map.len(),
            Store::Lru { cache, .. } => cache.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str) -> PlaceMatch {
        PlaceMatch {
            place_id: id.to_string(),
            name: format!("Place {id}"),
        }
    }

    #[test]
    fn unbounded_keeps_everything() {
        let cache = PlaceCache::new(EvictionPolicy::Unbounded);
        for i in 0..50 {
            cache.insert(&format!("query {i}"), place(&i.to_string()));
        }
        assert_eq!(cache.len(), 50);
        assert_eq!(cache.get("query 0"), Some(place("0")));
        assert_eq!(cache.get("Query 0"), None, "keys are the raw query text");
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let cache = PlaceCache::new(EvictionPolicy::from_settings(Some(2), None));
        cache.insert("a", place("a"));
        cache.insert("b", place("b"));
        assert!(cache.get("a").is_some());
        cache.insert("c", place("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn lru_entries_expire_after_ttl() {
        let cache = PlaceCache::new(EvictionPolicy::from_settings(
            Some(4),
            Some(Duration::from_millis(0)),
        ));
        cache.insert("a", place("a"));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn zero_capacity_means_unbounded() {
        assert_eq!(
            EvictionPolicy::from_settings(Some(0), Some(Duration::from_secs(5))),
            EvictionPolicy::Unbounded
        );
    }
}
