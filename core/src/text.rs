use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref NON_TERM: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a", "an", "the", "and", "or", "but", "if", "then", "else", "when", "at", "by",
            "for", "from", "in", "into", "of", "on", "to", "with", "as", "is", "are", "was",
            "were", "be", "been", "being", "it", "its", "that", "this", "these", "those",
            "will", "would", "can", "could", "should", "may", "might", "we", "you", "they",
            "he", "she", "them", "his", "her", "their", "our", "us", "i",
        ];
        words.iter().copied().collect()
    };
}

// Suffixes tried in priority order; only the first match is stripped.
const SUFFIXES: [&str; 4] = ["ing", "ed", "ly", "s"];

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Strip a single common suffix when the token is long enough to survive it.
/// Deliberately naive: no dictionary, no recursion.
fn strip_suffix(token: &str) -> &str {
    for suf in SUFFIXES {
        if token.len() > suf.len() + 2 {
            if let Some(stem) = token.strip_suffix(suf) {
                return stem;
            }
        }
    }
    token
}

/// Normalize raw text into index terms: lowercase, strip everything outside
/// `[a-z0-9]` and whitespace, drop stopwords, then apply the suffix heuristic.
/// Order and duplicates are preserved; frequency matters downstream.
pub fn process(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let lowered = text.to_lowercase();
    let cleaned = NON_TERM.replace_all(&lowered, " ");
    cleaned
        .split_whitespace()
        .filter(|t| !is_stopword(t))
        .map(|t| strip_suffix(t).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_becomes_whitespace() {
        let terms = process("Hello, world! (again)");
        assert_eq!(terms, vec!["hello", "world", "again"]);
    }

    #[test]
    fn stopwords_are_dropped() {
        let terms = process("the cat and the dog");
        assert_eq!(terms, vec!["cat", "dog"]);
    }

    #[test]
    fn suffixes_strip_once_without_recursion() {
        assert_eq!(strip_suffix("searching"), "search");
        assert_eq!(strip_suffix("indexed"), "index");
        assert_eq!(strip_suffix("quickly"), "quick");
        assert_eq!(strip_suffix("cats"), "cat");
        // too short to strip
        assert_eq!(strip_suffix("ring"), "ring");
        assert_eq!(strip_suffix("red"), "red");
        // only one pass: "strings" loses the plural, not the "ing"
        assert_eq!(strip_suffix("strings"), "string");
    }

    #[test]
    fn order_and_duplicates_survive() {
        assert_eq!(process("cat dog cat"), vec!["cat", "dog", "cat"]);
    }

    #[test]
    fn empty_input_yields_no_terms() {
        assert!(process("").is_empty());
        assert!(process("   \t\n").is_empty());
    }
}
