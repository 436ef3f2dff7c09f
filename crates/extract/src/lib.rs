//! Lexical extraction for FIR narratives.
//!
//! Provides pure functions used by the scorer:
//! - Explicit citation extraction ("Section 302", "u/s 302", "302 IPC")
//! - Bare section-number collection for corroborated matching
//! - Title tokenization with stop-word filtering

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Citation introducers: "section 302", "sec. 302", "u/s 302",
/// "under section 302". The trailing `\b` keeps the captured code
/// word-bounded so "302" is never read out of "3021".
static CITATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:section|sec|u/s|under section)\.?\s*(\d+[a-z]?)\b")
        .expect("citation pattern is valid")
});

/// Statute-suffix citations: "302 ipc". The leading `\b` prevents
/// matching the tail of a longer number ("1302 ipc" captures 1302).
static STATUTE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+[a-z]?)\s*ipc\b").expect("statute suffix pattern is valid"));

/// Any word-bounded alphanumeric code: digits plus an optional single
/// letter suffix ("302", "304b").
static BARE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+[a-z]?\b").expect("bare code pattern is valid"));

/// Words carrying no signal in section titles.
static STOP_WORDS: &[&str] = &[
    "punishment",
    "for",
    "of",
    "act",
    "code",
    "section",
    "to",
    "in",
    "or",
    "and",
    "the",
    "a",
    "an",
    "causing",
    "voluntarily",
    "from",
    "by",
    "sale",
    "etc",
];

/// Extract explicitly cited section codes from narrative text.
///
/// Both pattern families are unioned into one set; no ordering
/// guarantee beyond set semantics. Matching is case-insensitive via
/// lowercasing the input.
pub fn extract_citations(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    let mut citations: HashSet<String> = CITATION_RE
        .captures_iter(&lower)
        .map(|c| c[1].to_string())
        .collect();
    citations.extend(STATUTE_SUFFIX_RE.captures_iter(&lower).map(|c| c[1].to_string()));
    citations
}

/// Collect every word-bounded code-shaped token in the text. These are
/// low-confidence on their own; the scorer requires keyword
/// corroboration before treating one as a section reference.
pub fn bare_codes(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    BARE_CODE_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokenize a section title into candidate keywords: lowercased,
/// stop-words removed, tokens of length <= `min_len` dropped.
pub fn title_keywords(title: &str, min_len: usize) -> Vec<String> {
    title
        .to_lowercase()
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w) && w.len() > min_len)
        .map(|w| w.to_string())
        .collect()
}

/// Keywords from `keywords` that occur in the (lowercased) text.
pub fn matched_keywords(keywords: &[String], text_lower: &str) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| text_lower.contains(k.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_introducers() {
        let citations = extract_citations("Booked under Section 302 and u/s 34");
        assert!(citations.contains("302"));
        assert!(citations.contains("34"));

        let citations = extract_citations("see sec. 420 for details");
        assert!(citations.contains("420"));
    }

    #[test]
    fn test_statute_suffix() {
        let citations = extract_citations("charged with 376 IPC last week");
        assert!(citations.contains("376"));
    }

    #[test]
    fn test_letter_suffix_codes() {
        let citations = extract_citations("a case under section 304B was registered");
        assert!(citations.contains("304b"));
    }

    #[test]
    fn test_word_boundary_on_citation() {
        // "1302 ipc" must not yield "302"
        let citations = extract_citations("reference 1302 IPC");
        assert!(citations.contains("1302"));
        assert!(!citations.contains("302"));
    }

    #[test]
    fn test_no_citations_in_plain_text() {
        assert!(extract_citations("the accused fled the scene").is_empty());
    }

    #[test]
    fn test_bare_codes_word_bounded() {
        let codes = bare_codes("amounts of 1302 and 302 were noted");
        assert!(codes.contains("1302"));
        assert!(codes.contains("302"));
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn test_title_keywords_filtering() {
        let keywords = title_keywords("Punishment for murder", 3);
        assert_eq!(keywords, vec!["murder".to_string()]);

        // stricter length bound drops short tokens too
        let keywords = title_keywords("Hurt by dangerous weapons", 4);
        assert_eq!(
            keywords,
            vec!["dangerous".to_string(), "weapons".to_string()]
        );
    }

    #[test]
    fn test_matched_keywords() {
        let keywords = vec!["murder".to_string(), "dacoity".to_string()];
        let found = matched_keywords(&keywords, "the accused committed murder at night");
        assert_eq!(found, vec!["murder".to_string()]);
    }
}
