use crate::error::Result;
use crate::index::{Document, Index};
use crate::source::DocumentSource;
use crate::text;
use std::collections::HashMap;

/// Build a complete index from `(doc id, raw text)` pairs in a single pass.
///
/// Documents whose processed token stream is empty are skipped entirely: they
/// are not stored and do not count toward `num_docs`. Titles are the first
/// non-empty line of the raw content, falling back to the doc id.
pub fn build<I>(docs: I) -> Index
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut inverted: HashMap<String, HashMap<String, u32>> = HashMap::new();
    let mut doc_lengths: HashMap<String, u32> = HashMap::new();
    let mut documents: HashMap<String, Document> = HashMap::new();

    for (id, raw) in docs {
        let terms = text::process(&raw);
        if terms.is_empty() {
            continue;
        }
        let title = raw
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| id.clone());

        doc_lengths.insert(id.clone(), terms.len() as u32);
        let mut tf: HashMap<String, u32> = HashMap::new();
        for term in terms {
            *tf.entry(term).or_insert(0) += 1;
        }
        for (term, freq) in tf {
            inverted.entry(term).or_default().insert(id.clone(), freq);
        }
        documents.insert(
            id.clone(),
            Document {
                id,
                title,
                content: raw,
                url: String::new(),
            },
        );
    }

    let num_docs = documents.len();
    let avg_doc_len = if num_docs == 0 {
        0.0
    } else {
        doc_lengths.values().map(|&l| l as f64).sum::<f64>() / num_docs as f64
    };

    // df and idf are derived together from the finished posting lists so the
    // statistics stay consistent with each other.
    let n = num_docs as f64;
    let mut doc_freq = HashMap::with_capacity(inverted.len());
    let mut idf = HashMap::with_capacity(inverted.len());
    for (term, postings) in &inverted {
        let df = postings.len() as u32;
        doc_freq.insert(term.clone(), df);
        let val = ((n - df as f64 + 0.5) / (df as f64 + 0.5) + 1.0).ln();
        idf.insert(term.clone(), val);
    }

    Index {
        inverted,
        doc_lengths,
        documents,
        doc_freq,
        idf,
        num_docs,
        avg_doc_len,
    }
}

/// Enumerate a document source and build the index over it.
pub fn build_from_source(source: &dyn DocumentSource) -> Result<Index> {
    let docs = source.documents()?;
    let index = build(docs);
    tracing::info!(
        num_docs = index.num_docs,
        terms = index.num_terms(),
        "indexed documents"
    );
    Ok(index)
}
