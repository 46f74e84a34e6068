use search_core::text::process;

#[test]
fn it_lowercases_and_strips_punctuation() {
    let terms = process("Search-Engines: Fast & Simple!");
    assert_eq!(terms, vec!["search", "engine", "fast", "simple"]);
}

#[test]
fn it_filters_stopwords() {
    let terms = process("The quick brown fox and the lazy dog");
    assert!(!terms.contains(&"the".to_string()));
    assert!(!terms.contains(&"and".to_string()));
    assert!(terms.contains(&"quick".to_string()));
}

#[test]
fn it_applies_the_suffix_heuristic() {
    let terms = process("indexing indexed documents quickly");
    assert_eq!(terms, vec!["index", "index", "document", "quick"]);
}

#[test]
fn digits_survive_normalization() {
    let terms = process("error 404 in build 2024");
    assert_eq!(terms, vec!["error", "404", "build", "2024"]);
}
