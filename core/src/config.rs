use crate::rank::{Bm25Params, RankingMode};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Engine knobs. Defaults match the shipped configuration; `from_env`
/// overrides them from `MINISEARCH_*` variables.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub ranking: RankingMode,
    pub max_results: usize,
    pub bm25: Bm25Params,
    pub cache_capacity: usize,
    /// When set, the result cache uses the sled backend at this path.
    pub cache_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ranking: RankingMode::Bm25,
            max_results: DEFAULT_MAX_RESULTS,
            bm25: Bm25Params::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_path: None,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(mode) = env::var("MINISEARCH_RANKING") {
            // unrecognized mode names keep the default rather than erroring
            if let Some(mode) = RankingMode::parse(&mode) {
                cfg.ranking = mode;
            }
        }
        if let Some(k) = parse_env("MINISEARCH_MAX_RESULTS") {
            cfg.max_results = k;
        }
        if let Some(k1) = parse_env("MINISEARCH_BM25_K1") {
            cfg.bm25.k1 = k1;
        }
        if let Some(b) = parse_env("MINISEARCH_BM25_B") {
            cfg.bm25.b = b;
        }
        if let Some(cap) = parse_env("MINISEARCH_CACHE_SIZE") {
            cfg.cache_capacity = cap;
        }
        if let Ok(path) = env::var("MINISEARCH_CACHE_PATH") {
            if !path.is_empty() {
                cfg.cache_path = Some(PathBuf::from(path));
            }
        }
        cfg
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_configuration() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.ranking, RankingMode::Bm25);
        assert_eq!(cfg.max_results, 10);
        assert_eq!(cfg.bm25.k1, 1.5);
        assert_eq!(cfg.bm25.b, 0.75);
        assert_eq!(cfg.cache_capacity, 256);
        assert!(cfg.cache_path.is_none());
    }
}
