// Match Scorer: keyword extraction, scoring, recommendations and resume synthesis.
// Every function here is pure; handlers.rs is the only HTTP-facing file.

pub mod handlers;
pub mod recommendations;
pub mod resume_writer;
pub mod scorer;
pub mod text;
pub mod tfidf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

/// A job-description term and its TF-IDF importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub weight: f64,
}

impl Keyword {
    pub fn new(term: impl Into<String>, weight: f64) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}

/// Coverage of one job-description sentence by the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsibilityCoverage {
    pub sentence: String,
    pub required_keywords: Vec<String>,
    pub covered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0 – 100
    pub score: u32,
    pub top_keywords: Vec<Keyword>,
    pub present_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Present in the resume at most once.
    pub weak_keywords: Vec<String>,
    pub responsibility: Vec<ResponsibilityCoverage>,
}

#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("Please provide 'job_description' and 'resume' in JSON body.")]
    InvalidInput,
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        AppError::Validation(err.to_string())
    }
}
