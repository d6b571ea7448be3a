use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RewriteBulletsRequest {
    #[serde(default)]
    pub role_text: String,
    #[serde(default)]
    pub jd: String,
}

#[derive(Debug, Serialize)]
pub struct RewriteBulletsResponse {
    pub bullets: Vec<String>,
}

/// POST /api/rewrite-bullets
pub async fn handle_rewrite_bullets(
    State(state): State<AppState>,
    Json(request): Json<RewriteBulletsRequest>,
) -> Result<Json<RewriteBulletsResponse>, AppError> {
    if request.role_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Provide 'role_text' in payload.".to_string(),
        ));
    }

    let bullets = state
        .rewriter
        .rewrite(&request.role_text, &request.jd)
        .await;

    Ok(Json(RewriteBulletsResponse { bullets }))
}
