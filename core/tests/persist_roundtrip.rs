use search_core::builder;
use search_core::persist::{load_index, save_index, IndexPaths};
use search_core::SearchError;
use tempfile::tempdir;

fn sample_docs() -> Vec<(String, String)> {
    vec![
        (
            "guide.txt".to_string(),
            "Search Guide\nBuilding search engines with inverted indexes.".to_string(),
        ),
        (
            "notes.txt".to_string(),
            "Notes\nRanking functions score documents against queries.".to_string(),
        ),
        (
            "cats.txt".to_string(),
            "Cats\ncat dog cat".to_string(),
        ),
    ]
}

#[test]
fn save_then_load_preserves_all_statistics() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    let built = builder::build(sample_docs());
    let snapshot = save_index(&paths, &built).unwrap();
    assert!(snapshot.exists());

    let loaded = load_index(&paths).unwrap();
    assert_eq!(loaded.num_docs, built.num_docs);
    assert_eq!(loaded.avg_doc_len.to_bits(), built.avg_doc_len.to_bits());
    assert_eq!(loaded.doc_lengths, built.doc_lengths);
    assert_eq!(loaded.doc_freq, built.doc_freq);
    assert_eq!(loaded.inverted, built.inverted);
    assert_eq!(loaded.documents, built.documents);
    assert_eq!(loaded.idf.len(), built.idf.len());
    for (term, idf) in &built.idf {
        assert_eq!(idf.to_bits(), loaded.idf[term].to_bits(), "idf for {term}");
    }
}

#[test]
fn meta_summary_is_written_alongside() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    save_index(&paths, &builder::build(sample_docs())).unwrap();

    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("meta.json")).unwrap())
            .unwrap();
    assert_eq!(meta["num_docs"], 3);
    assert!(meta["terms"].as_u64().unwrap() > 0);
}

#[test]
fn loading_without_a_snapshot_fails_with_index_not_found() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    match load_index(&paths) {
        Err(SearchError::IndexNotFound { path }) => {
            assert!(path.starts_with(dir.path()));
        }
        other => panic!("expected IndexNotFound, got {other:?}"),
    }
}
