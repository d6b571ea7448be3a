//! Scores a resume against a job description.
//!
//! score = round((0.6 × cosine + 0.4 × keyword_overlap) × 100)
//!
//! - cosine: similarity of the jointly vectorized JD and resume
//! - keyword_overlap: share of top-keyword weight the resume covers

use tracing::debug;

use crate::matching::text::{count_occurrences, normalize, tokenize};
use crate::matching::tfidf::{cosine_similarity, TfidfVectorizer};
use crate::matching::{Keyword, MatchError, MatchResult, ResponsibilityCoverage};

pub const TOP_KEYWORDS: usize = 40;
const KEYWORD_VOCABULARY: usize = 1000;
const SIMILARITY_VOCABULARY: usize = 2000;
const COSINE_WEIGHT: f64 = 0.6;
const OVERLAP_WEIGHT: f64 = 0.4;
const EPSILON: f64 = 1e-9;

/// Returns the `top_n` highest-weighted terms of `text`.
///
/// Equal weights are ordered lexicographically. Text with no vocabulary
/// (empty, or only stop words) yields an empty list.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<Keyword> {
    let normalized = normalize(text);
    let matrix = match TfidfVectorizer::new(KEYWORD_VOCABULARY).fit_transform(&[normalized.as_str()]) {
        Ok(m) => m,
        Err(_) => return Vec::new(),
    };

    let mut keywords: Vec<Keyword> = matrix
        .vocabulary
        .into_iter()
        .zip(matrix.rows[0].iter().copied())
        .map(|(term, weight)| Keyword::new(term, weight))
        .collect();

    keywords.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.term.cmp(&b.term))
    });
    keywords.truncate(top_n);
    keywords
}

/// Full match pipeline. Fails only when either input is blank after normalization.
pub fn compute_match(job_description: &str, resume: &str) -> Result<MatchResult, MatchError> {
    let jd_clean = normalize(job_description);
    let resume_clean = normalize(resume);
    if jd_clean.is_empty() || resume_clean.is_empty() {
        return Err(MatchError::InvalidInput);
    }

    let top_keywords = extract_keywords(&jd_clean, TOP_KEYWORDS);
    let resume_tokens = tokenize(&resume_clean);

    let (present, missing): (Vec<&Keyword>, Vec<&Keyword>) = top_keywords
        .iter()
        .partition(|k| resume_tokens.contains(&k.term));

    let total_weight: f64 = top_keywords.iter().map(|k| k.weight).sum::<f64>() + EPSILON;
    let matched_weight: f64 = present.iter().map(|k| k.weight).sum();
    let keyword_overlap = matched_weight / total_weight;

    let cosine = document_similarity(&jd_clean, &resume_clean);

    let combined = COSINE_WEIGHT * cosine + OVERLAP_WEIGHT * keyword_overlap;
    let score = (combined * 100.0).round().clamp(0.0, 100.0) as u32;

    debug!(
        "match computed: cosine={cosine:.3}, keyword_overlap={keyword_overlap:.3}, score={score}"
    );

    let present_keywords: Vec<String> = present.iter().map(|k| k.term.clone()).collect();
    let missing_keywords: Vec<String> = missing.iter().map(|k| k.term.clone()).collect();
    let weak_keywords: Vec<String> = present_keywords
        .iter()
        .filter(|term| count_occurrences(&resume_clean, term) <= 1)
        .cloned()
        .collect();

    let responsibility = responsibility_coverage(job_description, &top_keywords, |term| {
        resume_tokens.contains(term)
    });

    Ok(MatchResult {
        score,
        top_keywords,
        present_keywords,
        missing_keywords,
        weak_keywords,
        responsibility,
    })
}

/// Cosine similarity over a shared vocabulary. Vectorization failure counts as 0.0.
fn document_similarity(jd_clean: &str, resume_clean: &str) -> f64 {
    match TfidfVectorizer::new(SIMILARITY_VOCABULARY).fit_transform(&[jd_clean, resume_clean]) {
        Ok(matrix) => cosine_similarity(&matrix.rows[0], &matrix.rows[1]),
        Err(e) => {
            debug!("similarity defaulted to 0.0: {e}");
            0.0
        }
    }
}

/// Splits the raw JD on periods and newlines and checks each sentence's keywords.
fn responsibility_coverage(
    job_description: &str,
    top_keywords: &[Keyword],
    in_resume: impl Fn(&str) -> bool,
) -> Vec<ResponsibilityCoverage> {
    job_description
        .split(['.', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|sentence| {
            let sentence_tokens = tokenize(sentence);
            let required_keywords: Vec<String> = top_keywords
                .iter()
                .filter(|k| sentence_tokens.contains(&k.term))
                .map(|k| k.term.clone())
                .collect();
            let covered = required_keywords.iter().any(|k| in_resume(k.as_str()));
            ResponsibilityCoverage {
                sentence: sentence.to_string(),
                required_keywords,
                covered,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const BACKEND_JD: &str = "Senior Backend Engineer experienced with Python, FastAPI, Docker, \
        Kubernetes, PostgreSQL, CI/CD, monitoring.";
    const BACKEND_RESUME: &str = "Experienced backend developer. Built REST APIs using Python and \
        FastAPI. Containerized applications with Docker and deployed to Kubernetes. Worked with \
        PostgreSQL and CI/CD pipelines.";

    #[test]
    fn test_backend_scenario_scores_above_half() {
        let result = compute_match(BACKEND_JD, BACKEND_RESUME).unwrap();
        assert!(result.score > 50, "Expected >50, got {}", result.score);
        assert!(!result.present_keywords.is_empty());
        assert!(result.missing_keywords.len() < result.present_keywords.len());
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let pairs = [
            ("rust rust rust", "rust rust rust"),
            ("rust engineer", "accountant payroll"),
            (BACKEND_JD, BACKEND_RESUME),
            ("the and of", "the and of"),
        ];
        for (jd, resume) in pairs {
            let result = compute_match(jd, resume).unwrap();
            assert!(result.score <= 100);
        }
    }

    #[test]
    fn test_present_and_missing_partition_top_keywords() {
        let result = compute_match(BACKEND_JD, "Python developer with Docker").unwrap();
        let present: HashSet<_> = result.present_keywords.iter().collect();
        let missing: HashSet<_> = result.missing_keywords.iter().collect();
        let all: HashSet<_> = result.top_keywords.iter().map(|k| &k.term).collect();

        assert!(present.is_disjoint(&missing));
        assert_eq!(&present | &missing, all);
    }

    #[test]
    fn test_weak_keywords_subset_of_present() {
        let resume = "Python python python. Docker once. Kubernetes once.";
        let result = compute_match(BACKEND_JD, resume).unwrap();
        assert!(result
            .weak_keywords
            .iter()
            .all(|w| result.present_keywords.contains(w)));
        assert!(result.weak_keywords.contains(&"docker".to_string()));
        assert!(!result.weak_keywords.contains(&"python".to_string()));
    }

    #[test]
    fn test_compute_match_is_idempotent() {
        let first = compute_match(BACKEND_JD, BACKEND_RESUME).unwrap();
        let second = compute_match(BACKEND_JD, BACKEND_RESUME).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_inputs_are_invalid() {
        assert_eq!(
            compute_match("", BACKEND_RESUME).unwrap_err(),
            MatchError::InvalidInput
        );
        assert_eq!(
            compute_match(BACKEND_JD, "  ?!  ").unwrap_err(),
            MatchError::InvalidInput
        );
    }

    #[test]
    fn test_stop_word_only_texts_score_zero() {
        let result = compute_match("the and of", "with the").unwrap();
        assert_eq!(result.score, 0);
        assert!(result.top_keywords.is_empty());
    }

    #[test]
    fn test_present_keywords_keep_jd_rank_order() {
        let jd = "rust rust rust java java python";
        let result = compute_match(jd, "python java rust").unwrap();
        assert_eq!(result.present_keywords, vec!["rust", "java", "python"]);
    }

    #[test]
    fn test_extract_keywords_orders_by_weight_then_term() {
        let keywords = extract_keywords("zeta alpha beta beta", 10);
        let terms: Vec<&str> = keywords.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms, vec!["beta", "alpha", "zeta"]);
        assert!(keywords.windows(2).all(|w| w[0].weight >= w[1].weight));
    }

    #[test]
    fn test_extract_keywords_truncates_and_handles_empty() {
        assert_eq!(extract_keywords("a b c d e f g h", 3).len(), 0);
        assert_eq!(extract_keywords("", 5), Vec::<Keyword>::new());
        assert_eq!(extract_keywords("alpha beta gamma delta", 2).len(), 2);
    }

    #[test]
    fn test_responsibility_coverage_per_sentence() {
        let jd = "Build services in Python.\nOperate Kubernetes clusters.\n\n";
        let result = compute_match(jd, "Python developer").unwrap();
        assert_eq!(result.responsibility.len(), 2);

        let first = &result.responsibility[0];
        assert_eq!(first.sentence, "Build services in Python");
        assert!(first.required_keywords.contains(&"python".to_string()));
        assert!(first.covered);

        let second = &result.responsibility[1];
        assert!(second.required_keywords.contains(&"kubernetes".to_string()));
        assert!(!second.covered);
    }
}
