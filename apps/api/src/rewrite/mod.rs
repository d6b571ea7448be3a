//! Bullet Rewriter — pluggable, trait-based rewriting of one role into resume bullets.
//!
//! Default: `HeuristicRewriter` (pure-Rust, deterministic, no network).
//! With an LLM key configured: `LlmRewriter`, which falls back to the heuristic
//! on any LLM failure so callers always get the same output shape.
//!
//! `AppState` holds an `Arc<dyn BulletRewriter>`, chosen at startup.

pub mod handlers;
pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::LlmClient;
use crate::matching::resume_writer::generate_bullets_for_role;
use crate::matching::scorer::extract_keywords;
use crate::rewrite::prompts::{build_bullet_rewrite_prompt, BULLET_REWRITE_SYSTEM};

/// JD keywords considered when generating heuristic bullets.
const HEURISTIC_KEYWORDS: usize = 20;
const MAX_LLM_BULLETS: usize = 4;

/// Implement this to swap rewriting backends without touching handlers.
#[async_trait]
pub trait BulletRewriter: Send + Sync {
    /// Never fails; backends degrade to heuristic bullets.
    async fn rewrite(&self, role_text: &str, jd: &str) -> Vec<String>;

    /// "heuristic" | "llm" — for logs.
    fn backend(&self) -> &'static str;
}

pub struct HeuristicRewriter;

#[async_trait]
impl BulletRewriter for HeuristicRewriter {
    async fn rewrite(&self, role_text: &str, jd: &str) -> Vec<String> {
        heuristic_bullets(role_text, jd)
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

fn heuristic_bullets(role_text: &str, jd: &str) -> Vec<String> {
    let keywords = extract_keywords(jd, HEURISTIC_KEYWORDS);
    generate_bullets_for_role(role_text, &keywords)
}

pub struct LlmRewriter {
    llm: LlmClient,
}

impl LlmRewriter {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl BulletRewriter for LlmRewriter {
    async fn rewrite(&self, role_text: &str, jd: &str) -> Vec<String> {
        let prompt = build_bullet_rewrite_prompt(jd, role_text);

        match self.llm.call_text(&prompt, BULLET_REWRITE_SYSTEM).await {
            Ok(text) => {
                let bullets = parse_bullets(&text);
                if bullets.is_empty() {
                    warn!("LLM returned no bullets; using heuristic fallback");
                    heuristic_bullets(role_text, jd)
                } else {
                    bullets
                }
            }
            Err(e) => {
                warn!("LLM bullet rewrite failed, using heuristic fallback: {e}");
                heuristic_bullets(role_text, jd)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// One bullet per non-empty line, list markers stripped, at most four.
fn parse_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_matches(|c: char| matches!(c, '-' | '*' | ' ' | '\t')))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .take(MAX_LLM_BULLETS)
        .collect()
}

/// Picks the LLM backend when an API key is configured.
pub fn select_rewriter(llm: Option<LlmClient>) -> Arc<dyn BulletRewriter> {
    let rewriter: Arc<dyn BulletRewriter> = match llm {
        Some(llm) => Arc::new(LlmRewriter::new(llm)),
        None => Arc::new(HeuristicRewriter),
    };
    info!("Bullet rewriter backend: {}", rewriter.backend());
    rewriter
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const ROLE: &str = "Senior Engineer\nImproved platform performance by 30%. Used Python and Docker.";
    const JD: &str = "Senior backend role with Python and Docker.";

    fn llm_rewriter(server: &MockServer) -> LlmRewriter {
        LlmRewriter::new(LlmClient::new("key".to_string(), server.url("/v1/messages")).unwrap())
    }

    #[test]
    fn test_parse_bullets_strips_markers_and_caps() {
        let text = "- First\n* Second\n\n\t- Third -\nFourth\nFifth";
        assert_eq!(
            parse_bullets(text),
            vec!["First", "Second", "Third", "Fourth"]
        );
    }

    #[tokio::test]
    async fn test_heuristic_rewriter_uses_jd_keywords() {
        let bullets = HeuristicRewriter.rewrite(ROLE, JD).await;
        assert!(!bullets.is_empty());
        assert!(bullets.iter().any(|b| b.contains("docker") || b.contains("python")));
    }

    #[tokio::test]
    async fn test_heuristic_rewriter_with_empty_jd() {
        let bullets = HeuristicRewriter.rewrite(ROLE, "").await;
        assert!(bullets[0].contains("cross-functional"));
    }

    #[tokio::test]
    async fn test_llm_rewriter_returns_model_bullets() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .body_contains("Role text:");
            then.status(200).json_body(json!({
                "content": [{"type": "text", "text": "- Cut latency 30% with Python\n- Containerized services with Docker"}],
                "usage": {"input_tokens": 50, "output_tokens": 20}
            }));
        });

        let bullets = llm_rewriter(&server).rewrite(ROLE, JD).await;
        mock.assert();
        assert_eq!(
            bullets,
            vec![
                "Cut latency 30% with Python",
                "Containerized services with Docker"
            ]
        );
    }

    #[tokio::test]
    async fn test_llm_rewriter_falls_back_on_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(400)
                .json_body(json!({"error": {"message": "bad request"}}));
        });

        let bullets = llm_rewriter(&server).rewrite(ROLE, JD).await;
        let expected = HeuristicRewriter.rewrite(ROLE, JD).await;
        assert_eq!(bullets, expected);
    }

    #[tokio::test]
    async fn test_llm_rewriter_falls_back_on_blank_reply() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(json!({
                "content": [{"type": "text", "text": "  \n\n"}],
                "usage": {"input_tokens": 1, "output_tokens": 1}
            }));
        });

        let bullets = llm_rewriter(&server).rewrite(ROLE, JD).await;
        assert_eq!(bullets, HeuristicRewriter.rewrite(ROLE, JD).await);
    }

    #[test]
    fn test_select_rewriter_without_key_is_heuristic() {
        assert_eq!(select_rewriter(None).backend(), "heuristic");
    }
}
