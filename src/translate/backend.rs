use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A source language and the languages it can be translated into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Language {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

/// One batch of texts to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub texts: Vec<String>,
    pub source: String,
    pub target: String,
    pub api_key: Option<String>,
}

/// A remote translation service.
///
/// `translate` answers positionally: the n-th returned text is the
/// translation of the n-th requested one. A request the service rejects is
/// reported as [`AuditError::Backend`](crate::error::AuditError::Backend),
/// which the pipeline treats as transient.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn languages(&self) -> Result<Vec<Language>>;

    async fn translate(&self, request: &TranslateRequest) -> Result<Vec<String>>;

    /// Human-readable identity used in messages, e.g. the API URL.
    fn name(&self) -> &str;
}
