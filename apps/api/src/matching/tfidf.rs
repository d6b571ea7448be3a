//! TF-IDF vectorizer: raw term counts, smoothed IDF and L2-normalized rows.
//!
//! Tokens are maximal runs of two or more alphanumeric characters, lowercased,
//! with English stop words removed. Vocabulary is capped at `max_features`
//! terms, keeping the most frequent across the corpus.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VectorizeError {
    #[error("empty vocabulary; documents contain only stop words or no terms")]
    EmptyVocabulary,
}

/// Fitted document-term matrix. Rows follow input document order; columns
/// follow `vocabulary`, which is sorted lexicographically.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Builds the vocabulary from `documents` and returns their TF-IDF rows.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix, VectorizeError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| analyze(d)).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        for doc in &tokenized {
            for token in doc {
                *corpus_counts.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        if corpus_counts.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let n_docs = documents.len() as f64;
        let mut doc_freq = vec![0usize; vocabulary.len()];
        let mut counts: Vec<BTreeMap<usize, f64>> = Vec::with_capacity(tokenized.len());

        for doc in &tokenized {
            let mut row: BTreeMap<usize, f64> = BTreeMap::new();
            for token in doc {
                if let Some(&col) = index.get(token.as_str()) {
                    *row.entry(col).or_insert(0.0) += 1.0;
                }
            }
            for &col in row.keys() {
                doc_freq[col] += 1;
            }
            counts.push(row);
        }

        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|row| {
                let mut dense = vec![0.0; vocabulary.len()];
                for (col, tf) in row {
                    dense[col] = tf * idf[col];
                }
                l2_normalize(&mut dense);
                dense
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }
}

/// Cosine similarity of two equal-length vectors; 0.0 when either is all zeros.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn l2_normalize(values: &mut [f64]) {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        values.iter_mut().for_each(|v| *v /= norm);
    }
}

fn analyze(text: &str) -> Vec<String> {
    let stop_words = stop_words();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2 && !stop_words.contains(*t))
        .map(str::to_string)
        .collect()
}

fn stop_words() -> &'static HashSet<&'static str> {
    static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOP_WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_and_short_tokens_excluded() {
        let matrix = TfidfVectorizer::new(100)
            .fit_transform(&["the a python and x rust"])
            .unwrap();
        assert_eq!(matrix.vocabulary, vec!["python", "rust"]);
    }

    #[test]
    fn test_only_stop_words_is_empty_vocabulary() {
        let err = TfidfVectorizer::new(100)
            .fit_transform(&["the and of", "with"])
            .unwrap_err();
        assert_eq!(err, VectorizeError::EmptyVocabulary);
    }

    #[test]
    fn test_single_document_weights_follow_counts() {
        let matrix = TfidfVectorizer::new(100)
            .fit_transform(&["docker docker kubernetes"])
            .unwrap();
        let row = &matrix.rows[0];
        let docker = matrix.vocabulary.iter().position(|t| t == "docker").unwrap();
        let k8s = matrix.vocabulary.iter().position(|t| t == "kubernetes").unwrap();
        assert!(row[docker] > row[k8s]);
        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let matrix = TfidfVectorizer::new(2)
            .fit_transform(&["alpha alpha beta beta beta gamma"])
            .unwrap();
        assert_eq!(matrix.vocabulary, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_identical_documents_have_similarity_one() {
        let matrix = TfidfVectorizer::new(100)
            .fit_transform(&["python docker", "python docker"])
            .unwrap();
        let sim = cosine_similarity(&matrix.rows[0], &matrix.rows[1]);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents_have_similarity_zero() {
        let matrix = TfidfVectorizer::new(100)
            .fit_transform(&["python docker", "accounting payroll"])
            .unwrap();
        assert_eq!(cosine_similarity(&matrix.rows[0], &matrix.rows[1]), 0.0);
    }

    #[test]
    fn test_cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
