//! Text normalization shared by keyword extraction, scoring and bullet synthesis.

use std::collections::HashSet;

/// Lowercases, turns every non-alphanumeric character into a space and
/// collapses whitespace runs. Total: any input yields a (possibly empty) string.
pub fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes then splits into a set of unique tokens.
pub fn tokenize(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Counts occurrences of `term` among the whitespace tokens of already-normalized text.
pub fn count_occurrences(normalized: &str, term: &str) -> usize {
    normalized.split_whitespace().filter(|t| *t == term).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(
            normalize("Python, FastAPI & CI/CD!"),
            "python fastapi ci cd"
        );
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a \n\t b   c  "), "a b c");
    }

    #[test]
    fn test_normalize_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("... --- !!!"), "");
    }

    #[test]
    fn test_normalize_replaces_non_ascii_letters() {
        assert_eq!(normalize("Senior Engineer — café"), "senior engineer caf");
    }

    #[test]
    fn test_tokenize_collapses_duplicates() {
        let tokens = tokenize("Docker docker DOCKER kubernetes");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("docker"));
        assert!(tokens.contains("kubernetes"));
    }

    #[test]
    fn test_count_occurrences_matches_whole_tokens() {
        let text = normalize("Python scripts, python services and pythonic code");
        assert_eq!(count_occurrences(&text, "python"), 2);
        assert_eq!(count_occurrences(&text, "rust"), 0);
    }
}
