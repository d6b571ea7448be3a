use anyhow::{Context, Result};

use crate::baas::DEFAULT_BASE_URL;
use crate::llm_client::DEFAULT_API_URL;

/// Application configuration loaded from environment variables.
/// Every variable is optional; missing BaaS or LLM credentials only disable those features.
#[derive(Debug, Clone)]
pub struct Config {
    pub application_id: String,
    pub master_key: String,
    pub back4app_url: String,
    /// Enables the LLM bullet rewriter when set.
    pub anthropic_api_key: Option<String>,
    pub llm_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            application_id: optional_env("APPLICATION_ID").unwrap_or_default(),
            master_key: optional_env("MASTER_KEY").unwrap_or_default(),
            back4app_url: optional_env("BACK4APP_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_api_url: optional_env("LLM_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
