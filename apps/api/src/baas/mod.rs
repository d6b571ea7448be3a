//! Parse Server REST client (Back4App): credential validation, schema creation
//! and file upload.
//!
//! Every call returns a `BaasOutcome`; transport and API failures are reported
//! in the payload with `ok: false` instead of as errors.

pub mod handlers;

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://parseapi.back4app.com";
const VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const MISSING_CREDENTIALS: &str = "Missing APPLICATION_ID or MASTER_KEY";

/// Structured result of any BaaS call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaasOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_response_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BaasOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct ParseClient {
    client: Client,
    base_url: String,
    application_id: String,
    master_key: String,
}

impl ParseClient {
    pub fn new(base_url: String, application_id: String, master_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            application_id,
            master_key,
        }
    }

    fn has_credentials(&self) -> bool {
        !self.application_id.is_empty() && !self.master_key.is_empty()
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Parse-Application-Id", &self.application_id)
            .header("X-Parse-Master-Key", &self.master_key)
    }

    /// GET /classes/_User?limit=1 — a cheap call that only succeeds with valid keys.
    pub async fn validate(&self) -> BaasOutcome {
        if !self.has_credentials() {
            return BaasOutcome::failure(MISSING_CREDENTIALS);
        }

        let request = self
            .authed(self.client.get(format!("{}/classes/_User", self.base_url)))
            .query(&[("limit", "1")])
            .header("Content-Type", "application/json")
            .timeout(VALIDATE_TIMEOUT);

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Back4App validation request failed: {e}");
                return BaasOutcome::failure(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            return BaasOutcome {
                ok: false,
                status_code: Some(status.as_u16()),
                response_text: Some(response.text().await.unwrap_or_default()),
                ..Default::default()
            };
        }

        match response.json::<Value>().await {
            Ok(body) => BaasOutcome {
                ok: true,
                status_code: Some(status.as_u16()),
                sample_response_keys: Some(
                    body.as_object()
                        .map(|o| o.keys().cloned().collect())
                        .unwrap_or_default(),
                ),
                ..Default::default()
            },
            Err(e) => BaasOutcome::failure(e.to_string()),
        }
    }

    /// POST /schemas with a Parse class schema, e.g. `{"className": "Job", "fields": {...}}`.
    pub async fn create_class(&self, schema: &Value) -> BaasOutcome {
        if !self.has_credentials() {
            return BaasOutcome::failure(MISSING_CREDENTIALS);
        }

        let request = self
            .authed(self.client.post(format!("{}/schemas", self.base_url)))
            .json(schema)
            .timeout(REQUEST_TIMEOUT);

        debug!("Creating Parse class");
        self.send(request).await
    }

    /// POST /files/{filename} with the raw file bytes.
    pub async fn upload_file(&self, filename: &str, content: Bytes) -> BaasOutcome {
        if !self.has_credentials() {
            return BaasOutcome::failure(MISSING_CREDENTIALS);
        }

        let url = match self.file_url(filename) {
            Ok(url) => url,
            Err(e) => return BaasOutcome::failure(e),
        };

        let request = self
            .authed(self.client.post(url))
            .header("Content-Type", "application/octet-stream")
            .body(content)
            .timeout(REQUEST_TIMEOUT);

        debug!("Uploading file {filename} to Parse");
        self.send(request).await
    }

    /// `{base}/files/{filename}` with the name percent-encoded as one path segment.
    fn file_url(&self, filename: &str) -> Result<Url, String> {
        if matches!(filename.trim(), "" | "." | "..") {
            return Err(format!("Invalid filename: '{filename}'"));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid Back4App URL {}: {e}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| format!("Invalid Back4App URL {}", self.base_url))?
            .pop_if_empty()
            .push("files")
            .push(filename);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> BaasOutcome {
        match request.send().await {
            Ok(response) => outcome_from_response(response).await,
            Err(e) => {
                warn!("Back4App request failed: {e}");
                BaasOutcome::failure(e.to_string())
            }
        }
    }
}

/// JSON bodies count as ok regardless of status; text bodies are ok only on 2xx.
async fn outcome_from_response(response: Response) -> BaasOutcome {
    let status = response.status();
    let text = match response.text().await {
        Ok(t) => t,
        Err(e) => return BaasOutcome::failure(e.to_string()),
    };

    let (ok, body) = match serde_json::from_str::<Value>(&text) {
        Ok(json) => (true, json),
        Err(_) => (status.is_success(), Value::String(text)),
    };

    BaasOutcome {
        ok,
        status_code: Some(status.as_u16()),
        response: Some(body),
        ..Default::default()
    }
}
