use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::query::SearchResult;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::path::Path;

/// Memoizes ranked results per `(mode, k, query)` key. Implementations are
/// internally synchronized; callers share them across concurrent searches.
pub trait ResultCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<SearchResult>>;
    fn put(&self, key: &str, value: &[SearchResult]);
}

/// Bounded in-process cache with least-recently-used eviction. A `get` hit
/// refreshes recency.
pub struct LocalCache {
    entries: Mutex<LruCache<String, Vec<SearchResult>>>,
}

impl LocalCache {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }
}

impl ResultCache for LocalCache {
    fn get(&self, key: &str) -> Option<Vec<SearchResult>> {
        self.entries.lock().get(key).cloned()
    }

    fn put(&self, key: &str, value: &[SearchResult]) {
        self.entries.lock().put(key.to_string(), value.to_vec());
    }
}

/// Key-value cache backend on a sled tree, interchangeable with `LocalCache`.
/// Backend errors degrade to cache misses; they never fail the query.
pub struct SledCache {
    tree: sled::Db,
}

impl SledCache {
    pub fn open(path: &Path) -> Result<Self> {
        let tree = sled::open(path).map_err(|e| SearchError::CacheUnavailable(e.to_string()))?;
        Ok(Self { tree })
    }
}

impl ResultCache for SledCache {
    fn get(&self, key: &str) -> Option<Vec<SearchResult>> {
        match self.tree.get(key.as_bytes()) {
            Ok(Some(raw)) => match bincode::deserialize(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(%err, key, "dropping undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(%err, key, "cache read failed");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &[SearchResult]) {
        match bincode::serialize(value) {
            Ok(bytes) => {
                if let Err(err) = self.tree.insert(key.as_bytes(), bytes) {
                    tracing::warn!(%err, key, "cache write failed");
                }
            }
            Err(err) => tracing::warn!(%err, key, "cache entry encoding failed"),
        }
    }
}

/// Pick the cache backend for a configuration. A backend that fails to open
/// falls back to the in-process cache here, once, not on every call.
pub fn open_cache(config: &SearchConfig) -> Box<dyn ResultCache> {
    if let Some(path) = &config.cache_path {
        match SledCache::open(path) {
            Ok(cache) => return Box::new(cache),
            Err(err) => {
                tracing::warn!(%err, "falling back to in-process result cache");
            }
        }
    }
    Box::new(LocalCache::new(config.cache_capacity))
}
