use crate::cache::{self, ResultCache};
use crate::config::SearchConfig;
use crate::index::{Document, Index};
use crate::rank::{self, DefaultRanker, Ranker, RankingMode};
use crate::snippet;
use crate::text;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub doc_id: String,
    pub title: String,
    pub url: String,
    pub score: f64,
    pub snippet: String,
}

/// The single entry point for queries: text processing, cache lookup,
/// ranking, document hydration, snippets, cache store.
///
/// The active index is an `Arc` behind a lock; `swap_index` replaces the
/// reference atomically, so in-flight searches finish against the index they
/// started with and never observe a partially rebuilt one.
pub struct QueryEngine {
    index: RwLock<Arc<Index>>,
    cache: RwLock<Box<dyn ResultCache>>,
    ranker: Box<dyn Ranker>,
    config: SearchConfig,
}

impl QueryEngine {
    pub fn new(index: Index, config: SearchConfig) -> Self {
        let cache = cache::open_cache(&config);
        let ranker = Box::new(DefaultRanker::new(config.bm25));
        Self::with_parts(index, config, cache, ranker)
    }

    /// Construction seam for tests: inject a cache and a ranker.
    pub fn with_parts(
        index: Index,
        config: SearchConfig,
        cache: Box<dyn ResultCache>,
        ranker: Box<dyn Ranker>,
    ) -> Self {
        Self {
            index: RwLock::new(Arc::new(index)),
            cache: RwLock::new(cache),
            ranker,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Snapshot of the currently active index.
    pub fn index(&self) -> Arc<Index> {
        self.index.read().clone()
    }

    /// Atomically replace the active index. The cache is left as is; callers
    /// that rebuild are expected to pair this with `reset_cache`.
    pub fn swap_index(&self, index: Index) {
        *self.index.write() = Arc::new(index);
    }

    /// Replace the result cache with a fresh backend from the configuration.
    pub fn reset_cache(&self) {
        *self.cache.write() = cache::open_cache(&self.config);
    }

    pub fn document(&self, doc_id: &str) -> Option<Document> {
        self.index().documents.get(doc_id).cloned()
    }

    /// Run a query. Blank queries return no results without touching the
    /// cache or the index. Unrecognized mode names fall back to the
    /// configured default.
    pub fn search(&self, query: &str, k: Option<usize>, mode: Option<&str>) -> Vec<SearchResult> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let k = k.unwrap_or(self.config.max_results).max(1);
        let mode = mode
            .and_then(RankingMode::parse)
            .unwrap_or(self.config.ranking);
        let key = format!("q:{}:{}:{}", mode.as_str(), k, trimmed.to_lowercase());
        if let Some(hit) = self.cache.read().get(&key) {
            tracing::debug!(key = %key, "result cache hit");
            return hit;
        }

        let index = self.index();
        let terms = text::process(trimmed);
        let scores = self.ranker.score(&index, &terms, mode);
        let ranked = rank::top_k(scores, k);

        let mut results = Vec::with_capacity(ranked.len());
        for (doc_id, score) in ranked {
            let doc = match index.documents.get(&doc_id) {
                Some(doc) => doc,
                None => continue,
            };
            let body = snippet::make_snippet(&doc.content, &terms, snippet::DEFAULT_WINDOW);
            results.push(SearchResult {
                doc_id,
                title: doc.title.clone(),
                url: doc.url.clone(),
                score: round4(score),
                snippet: body,
            });
        }

        self.cache.read().put(&key, &results);
        results
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
