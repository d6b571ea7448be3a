mod baas;
mod config;
mod errors;
mod llm_client;
mod matching;
mod rewrite;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::baas::ParseClient;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::rewrite::select_rewriter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Match API v{}", env!("CARGO_PKG_VERSION"));

    if config.application_id.is_empty() || config.master_key.is_empty() {
        warn!("APPLICATION_ID or MASTER_KEY not set; Back4App endpoints will report missing credentials");
    }
    let baas = ParseClient::new(
        config.back4app_url.clone(),
        config.application_id.clone(),
        config.master_key.clone(),
    );
    info!("Back4App client initialized ({})", config.back4app_url);

    let llm = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.llm_api_url.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => None,
    };
    let rewriter = select_rewriter(llm);

    let state = AppState {
        config: config.clone(),
        baas,
        rewriter,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
