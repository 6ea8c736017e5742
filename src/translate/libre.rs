//! LibreTranslate HTTP backend.
//!
//! `GET {api}/languages` lists `{code, name, targets}` entries and
//! `POST {api}/translate` with `{q: [...], source, target, api_key}` answers
//! `{translatedText: [...]}` or `{error: "..."}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::backend::{Language, TranslateRequest, TranslationBackend};
use crate::error::{AuditError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Clone)]
pub struct LibreTranslate {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranslateResponse {
    Translated {
        #[serde(rename = "translatedText")]
        translated_text: Vec<String>,
    },
    Failed {
        error: String,
    },
}

impl LibreTranslate {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AuditError::Configuration(
                "Translation API URL cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder().build().map_err(|e| {
            AuditError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl TranslationBackend for LibreTranslate {
    async fn languages(&self) -> Result<Vec<Language>> {
        let url = self.endpoint("languages");
        debug!(%url, "fetching supported languages");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AuditError::Backend(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::Backend(format!(
                "GET {} answered {}: {}",
                url, status, body
            )));
        }

        response
            .json::<Vec<Language>>()
            .await
            .map_err(|e| AuditError::Backend(format!("Invalid languages response: {}", e)))
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<Vec<String>> {
        let url = self.endpoint("translate");
        let body = TranslateBody {
            q: &request.texts,
            source: &request.source,
            target: &request.target,
            format: "text",
            api_key: request.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuditError::Backend(format!("POST {} failed: {}", url, e)))?;

        // LibreTranslate reports failures as `{error}` with a non-2xx status,
        // so the body is parsed before the status is looked at.
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuditError::Backend(format!("Failed to read response: {}", e)))?;

        parse_translate_response(&text).map_err(|message| {
            if status.is_success() {
                AuditError::Backend(message)
            } else {
                AuditError::Backend(format!("{} ({})", message, status))
            }
        })
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

fn parse_translate_response(body: &str) -> std::result::Result<Vec<String>, String> {
    match serde_json::from_str::<TranslateResponse>(body) {
        Ok(TranslateResponse::Translated { translated_text }) => Ok(translated_text),
        Ok(TranslateResponse::Failed { error }) => Err(error),
        Err(_) => Err(format!("Unexpected response: {}", body.trim())),
    }
}
