use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermFreq = u32;

/// A document as stored on the index. Immutable once indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: String,
}

/// The in-memory statistical index. Built in one pass by `builder::build`;
/// the statistics are mutually consistent and never updated incrementally.
/// Rebuilds produce a whole new value that replaces the old one atomically.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Index {
    /// term -> doc id -> term frequency; posting lists are never empty
    pub inverted: HashMap<String, HashMap<String, TermFreq>>,
    /// doc id -> processed term count
    pub doc_lengths: HashMap<String, u32>,
    pub documents: HashMap<String, Document>,
    /// term -> number of documents containing it
    pub doc_freq: HashMap<String, u32>,
    /// term -> BM25-style idf, computed once per build
    pub idf: HashMap<String, f64>,
    pub num_docs: usize,
    pub avg_doc_len: f64,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_terms(&self) -> usize {
        self.inverted.len()
    }
}
