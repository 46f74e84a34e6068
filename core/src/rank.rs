use crate::index::Index;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    Bm25,
    Tfidf,
}

impl RankingMode {
    /// Parse a user-supplied mode name. Unknown values yield `None` so the
    /// caller can fall back to its configured default.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bm25" => Some(Self::Bm25),
            "tfidf" => Some(Self::Tfidf),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bm25 => "bm25",
            Self::Tfidf => "tfidf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

/// Scores candidate documents for a processed query. The map contains only
/// documents with a nonzero score; zero relevance means absence, not 0.0.
pub trait Ranker: Send + Sync {
    fn score(&self, index: &Index, query_terms: &[String], mode: RankingMode)
        -> HashMap<String, f64>;
}

pub struct DefaultRanker {
    params: Bm25Params,
}

impl DefaultRanker {
    pub fn new(params: Bm25Params) -> Self {
        Self { params }
    }
}

impl Ranker for DefaultRanker {
    fn score(
        &self,
        index: &Index,
        query_terms: &[String],
        mode: RankingMode,
    ) -> HashMap<String, f64> {
        match mode {
            RankingMode::Bm25 => bm25_scores(index, query_terms, self.params),
            RankingMode::Tfidf => tfidf_scores(index, query_terms),
        }
    }
}

/// Union of posting-list doc ids over the distinct query terms. Terms absent
/// from the index contribute nothing.
fn candidate_docs<'a>(index: &'a Index, query_terms: &[String]) -> HashSet<&'a str> {
    let distinct: HashSet<&String> = query_terms.iter().collect();
    let mut docs = HashSet::new();
    for term in distinct {
        if let Some(postings) = index.inverted.get(term.as_str()) {
            docs.extend(postings.keys().map(String::as_str));
        }
    }
    docs
}

pub fn bm25_scores(
    index: &Index,
    query_terms: &[String],
    params: Bm25Params,
) -> HashMap<String, f64> {
    let Bm25Params { k1, b } = params;
    let mut scores = HashMap::new();
    for doc_id in candidate_docs(index, query_terms) {
        let dl = index.doc_lengths.get(doc_id).copied().unwrap_or(0) as f64;
        // epsilon keeps the zero-corpus avgdl from dividing by zero
        let norm = k1 * (1.0 - b + b * dl / (index.avg_doc_len + 1e-9));
        let mut s = 0.0;
        for term in query_terms {
            let tf = match index.inverted.get(term).and_then(|p| p.get(doc_id)) {
                Some(&tf) => tf as f64,
                None => continue,
            };
            let idf = index.idf.get(term).copied().unwrap_or(0.0);
            s += idf * (tf * (k1 + 1.0)) / (tf + norm);
        }
        if s != 0.0 {
            scores.insert(doc_id.to_string(), s);
        }
    }
    scores
}

pub fn tfidf_scores(index: &Index, query_terms: &[String]) -> HashMap<String, f64> {
    let mut query_tf: HashMap<&str, u32> = HashMap::new();
    for term in query_terms {
        *query_tf.entry(term.as_str()).or_insert(0) += 1;
    }

    // This idf is intentionally the smoothed, always-positive variant, computed
    // fresh from the current df and N rather than the stored BM25 idf.
    let n = index.num_docs as f64;
    let mut scores = HashMap::new();
    for doc_id in candidate_docs(index, query_terms) {
        let mut s = 0.0;
        for (&term, &qf) in &query_tf {
            let tf = match index.inverted.get(term).and_then(|p| p.get(doc_id)) {
                Some(&tf) => tf as f64,
                None => continue,
            };
            let df = index.doc_freq.get(term).copied().unwrap_or(1) as f64;
            let idf = ((n + 1.0) / df).ln() + 1.0;
            s += (tf * idf) * (qf as f64 * idf);
        }
        if s != 0.0 {
            scores.insert(doc_id.to_string(), s);
        }
    }
    scores
}

/// Order scores descending, breaking ties by doc id so repeated queries
/// return identical orderings, then keep the top `k`.
pub fn top_k(scores: HashMap<String, f64>, k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(k);
    ranked
}
