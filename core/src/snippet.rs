use regex::{Regex, RegexBuilder};

pub const DEFAULT_WINDOW: usize = 160;

const ELLIPSIS: &str = "...";

/// Case-insensitive matcher over the query terms, longest term first so a
/// short term never truncates a longer match. Term text is escaped; terms
/// carry no regex meaning.
fn term_matcher(terms: &[String]) -> Option<Regex> {
    let mut parts: Vec<&str> = terms
        .iter()
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .collect();
    parts.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    parts.dedup();
    if parts.is_empty() {
        return None;
    }
    let pattern = parts
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&pattern).case_insensitive(true).build().ok()
}

/// Slice by character offsets, so multi-byte content never splits a code
/// point. `start`/`end` are clamped to the string.
fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    if end <= start {
        return "";
    }
    let begin = s
        .char_indices()
        .nth(start)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let len = s[begin..]
        .char_indices()
        .nth(end - start)
        .map(|(i, _)| i)
        .unwrap_or(s.len() - begin);
    &s[begin..begin + len]
}

/// Extract a window around the earliest query-term occurrence and wrap every
/// term occurrence inside it in `<mark>` tags. Never fails: with no match the
/// snippet degrades to a truncated prefix.
pub fn make_snippet(content: &str, terms: &[String], window: usize) -> String {
    let matcher = term_matcher(terms);
    let total = content.chars().count();

    let (body, leading, trailing) = match matcher.as_ref().and_then(|re| re.find(content)) {
        Some(m) => {
            let hit = content[..m.start()].chars().count();
            let start = hit.saturating_sub(window / 2);
            let end = (start + window).min(total);
            (slice_chars(content, start, end), start > 0, end < total)
        }
        None if total > window => (slice_chars(content, 0, window), false, true),
        None => (content, false, false),
    };

    let highlighted = match &matcher {
        Some(re) => re
            .replace_all(body, |caps: &regex::Captures| {
                format!("<mark>{}</mark>", &caps[0])
            })
            .into_owned(),
        None => body.to_string(),
    };

    let mut out = String::with_capacity(highlighted.len() + 2 * ELLIPSIS.len());
    if leading {
        out.push_str(ELLIPSIS);
    }
    out.push_str(&highlighted);
    if trailing {
        out.push_str(ELLIPSIS);
    }
    out
}
