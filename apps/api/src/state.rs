use std::sync::Arc;

use crate::baas::ParseClient;
use crate::config::Config;
use crate::rewrite::BulletRewriter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub baas: ParseClient,
    /// Pluggable bullet rewriter. LLM-backed when ANTHROPIC_API_KEY is set, heuristic otherwise.
    pub rewriter: Arc<dyn BulletRewriter>,
}
