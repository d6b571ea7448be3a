//! Axum route handlers for the Match API.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::recommendations::generate_recommendations;
use crate::matching::resume_writer::{
    extract_summary_section, generate_improved_resume, generate_summary,
};
use crate::matching::scorer::compute_match;
use crate::matching::ResponsibilityCoverage;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub ats_score: u32,
    pub missing_keywords: Vec<String>,
    pub weak_keywords: Vec<String>,
    pub top_keywords: Vec<String>,
    pub responsibility: Vec<ResponsibilityCoverage>,
    pub recommendations: Vec<String>,
    pub rewritten_summary: String,
    pub optimized_resume: String,
}

/// POST /api/analyze
///
/// Scores the resume against the JD and returns advice plus a rewritten resume.
pub async fn handle_analyze(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = analyze(&request.job_description, &request.resume)?;
    info!("Analysis complete: ats_score={}", report.ats_score);
    Ok(Json(report))
}

/// Runs the whole pipeline for one (JD, resume) pair.
pub fn analyze(job_description: &str, resume: &str) -> Result<AnalysisReport, AppError> {
    let result = compute_match(job_description, resume)?;

    let recommendations =
        generate_recommendations(&result.missing_keywords, &result.weak_keywords);
    let rewritten_summary =
        generate_summary(&result.top_keywords, &extract_summary_section(resume));
    let optimized_resume = generate_improved_resume(&result.top_keywords, resume);

    Ok(AnalysisReport {
        ats_score: result.score,
        missing_keywords: result.missing_keywords,
        weak_keywords: result.weak_keywords,
        top_keywords: result.top_keywords.into_iter().map(|k| k.term).collect(),
        responsibility: result.responsibility,
        recommendations,
        rewritten_summary,
        optimized_resume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_builds_full_report() {
        let jd = "Backend engineer. Python and Docker required.";
        let resume = "Summary: Backend developer shipping Python services daily.\n\nExperience\nAcme\nPython and Docker deployments";
        let report = analyze(jd, resume).unwrap();

        assert!(report.ats_score <= 100);
        assert!(report.top_keywords.contains(&"python".to_string()));
        assert_eq!(report.responsibility.len(), 2);
        assert!(report.recommendations.len() >= 3);
        assert!(report
            .rewritten_summary
            .starts_with("Backend developer shipping Python services daily. Key skills:"));
        assert!(report.optimized_resume.contains("- Acme"));
    }

    #[test]
    fn test_analyze_rejects_blank_input() {
        let err = analyze("   ", "resume").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
