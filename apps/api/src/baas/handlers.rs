//! Axum route handlers proxying to the Parse Server backend.

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::baas::BaasOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadFileRequest {
    pub filename: Option<String>,
    pub content_base64: Option<String>,
}

/// GET /api/app-id
pub async fn handle_app_id(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "application_id": state.config.application_id }))
}

/// GET /api/validate-back4app
pub async fn handle_validate(State(state): State<AppState>) -> Json<BaasOutcome> {
    Json(state.baas.validate().await)
}

/// POST /api/create-class
///
/// Body is passed through as the Parse schema object.
pub async fn handle_create_class(
    State(state): State<AppState>,
    Json(schema): Json<Value>,
) -> Json<BaasOutcome> {
    Json(state.baas.create_class(&schema).await)
}

/// POST /api/upload-file
pub async fn handle_upload_file(
    State(state): State<AppState>,
    Json(request): Json<UploadFileRequest>,
) -> Json<BaasOutcome> {
    let (filename, encoded) = match (request.filename, request.content_base64) {
        (Some(f), Some(c)) if !f.is_empty() && !c.is_empty() => (f, c),
        _ => {
            return Json(BaasOutcome::failure(
                "Provide 'filename' and 'content_base64' in payload.",
            ))
        }
    };

    let content = match STANDARD.decode(encoded.as_bytes()) {
        Ok(raw) => Bytes::from(raw),
        Err(e) => return Json(BaasOutcome::failure(format!("Invalid base64: {e}"))),
    };

    Json(state.baas.upload_file(&filename, content).await)
}
