//! Scripted translation backend for exercising the pipeline offline.
//!
//! Without a script every request is answered by appending the target code
//! to each text: `"Hello"` becomes `"Hello_tr"`.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::backend::{Language, TranslateRequest, TranslationBackend};
use crate::error::{AuditError, Result};

/// What the next `translate` call answers.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Append `_{target}` to every text.
    Suffix,
    /// Return these texts verbatim, whatever was asked.
    Texts(Vec<String>),
    /// Reject the request with this message.
    Error(String),
}

#[derive(Debug, Default)]
pub struct MockBackend {
    languages: Vec<Language>,
    script: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<TranslateRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `source` as translatable into each of `targets`.
    pub fn with_language(mut self, source: &str, targets: &[&str]) -> Self {
        self.languages.push(Language {
            code: source.to_string(),
            name: source.to_string(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
        });
        self
    }

    /// Queue a reply; once the queue drains, requests fall back to
    /// [`MockReply::Suffix`].
    pub fn then(self, reply: MockReply) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(reply);
        }
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn languages(&self) -> Result<Vec<Language>> {
        Ok(self.languages.clone())
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<Vec<String>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let reply = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(MockReply::Suffix);

        match reply {
            MockReply::Suffix => Ok(request
                .texts
                .iter()
                .map(|text| format!("{}_{}", text, request.target))
                .collect()),
            MockReply::Texts(texts) => Ok(texts),
            MockReply::Error(message) => Err(AuditError::Backend(message)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
