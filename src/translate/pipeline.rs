//! Chunked, rate-limited translation of flat entries.
//!
//! Batches go out one at a time. A rejected batch is retried in place after a
//! fixed backoff; a batch that fails [`MAX_ATTEMPTS`] times aborts the whole
//! run, and so does any response that does not line up with its request.

use std::time::Duration;

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use super::backend::{TranslateRequest, TranslationBackend};
use crate::core::FlatEntry;
use crate::error::{AuditError, LanguageRole, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 10;
pub const MIN_CHUNK_DELAY: Duration = Duration::from_millis(1);
/// Failures of a single batch before the run is given up.
pub const MAX_ATTEMPTS: usize = 3;
pub const RETRY_BACKOFF: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub source_lang: String,
    pub target_lang: String,
    pub chunk_size: usize,
    pub chunk_delay: Duration,
    pub api_key: Option<String>,
}

impl PipelineOptions {
    /// Build options from raw user input. A non-positive chunk size falls
    /// back to [`DEFAULT_CHUNK_SIZE`] and a non-positive delay to
    /// [`MIN_CHUNK_DELAY`].
    pub fn new(
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        chunk_size: i64,
        chunk_delay_ms: i64,
    ) -> Self {
        let chunk_size = if chunk_size <= 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size as usize
        };
        let chunk_delay = if chunk_delay_ms <= 0 {
            MIN_CHUNK_DELAY
        } else {
            Duration::from_millis(chunk_delay_ms as u64)
        };

        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            chunk_size,
            chunk_delay,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }
}

/// A contiguous slice of the input rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Row index of the first text in this batch.
    pub start_index: usize,
    pub keys: Vec<String>,
    pub texts: Vec<String>,
}

/// Split `entries` into consecutive batches of at most `chunk_size` rows.
pub fn partition(entries: &[FlatEntry], chunk_size: usize) -> Vec<Batch> {
    entries
        .chunks(chunk_size.max(1))
        .enumerate()
        .map(|(index, chunk)| Batch {
            start_index: index * chunk_size.max(1),
            keys: chunk.iter().map(|entry| entry.key.clone()).collect(),
            texts: chunk.iter().map(FlatEntry::value_text).collect(),
        })
        .collect()
}

pub struct TranslationPipeline<'b> {
    backend: &'b dyn TranslationBackend,
    options: PipelineOptions,
    progress: ProgressBar,
}

impl<'b> TranslationPipeline<'b> {
    pub fn new(backend: &'b dyn TranslationBackend, options: PipelineOptions) -> Self {
        Self {
            backend,
            options,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report batch progress on `progress` instead of discarding it.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Translate every value, keeping keys and row order.
    ///
    /// Nothing is returned unless every row came back translated. The
    /// progress bar is finished on success and abandoned on any error.
    pub async fn run(&self, entries: &[FlatEntry]) -> Result<Vec<FlatEntry>> {
        match self.translate_all(entries).await {
            Ok(translated) => {
                self.progress.finish_with_message("Translation done");
                Ok(translated)
            }
            Err(err) => {
                self.progress.abandon_with_message("Translation aborted");
                Err(err)
            }
        }
    }

    async fn translate_all(&self, entries: &[FlatEntry]) -> Result<Vec<FlatEntry>> {
        self.check_languages().await?;

        let batches = partition(entries, self.options.chunk_size);
        info!(
            rows = entries.len(),
            batches = batches.len(),
            backend = self.backend.name(),
            "translating {} -> {}",
            self.options.source_lang,
            self.options.target_lang
        );

        let mut translated: Vec<Option<FlatEntry>> = vec![None; entries.len()];
        for (index, batch) in batches.iter().enumerate() {
            self.progress
                .set_message(format!("Translating [{}/{}]", index + 1, batches.len()));

            let texts = self.send(batch).await?;
            for (position, (key, text)) in batch.keys.iter().zip(texts).enumerate() {
                translated[batch.start_index + position] =
                    Some(FlatEntry::new(key.clone(), text));
            }
        }

        let translated: Vec<FlatEntry> = translated.into_iter().flatten().collect();
        if translated.len() != entries.len() {
            return Err(AuditError::Integrity {
                expected: entries.len(),
                actual: translated.len(),
            });
        }
        Ok(translated)
    }

    async fn check_languages(&self) -> Result<()> {
        let languages = self.backend.languages().await?;
        let unsupported = |role, code: &str| AuditError::UnsupportedLanguage {
            role,
            code: code.to_string(),
            backend: self.backend.name().to_string(),
        };

        let source = languages
            .iter()
            .find(|language| language.code == self.options.source_lang)
            .ok_or_else(|| unsupported(LanguageRole::Source, &self.options.source_lang))?;

        if !source.targets.contains(&self.options.target_lang) {
            return Err(unsupported(LanguageRole::Target, &self.options.target_lang));
        }
        Ok(())
    }

    /// Send one batch until it succeeds or runs out of attempts, then pause.
    async fn send(&self, batch: &Batch) -> Result<Vec<String>> {
        let request = TranslateRequest {
            texts: batch.texts.clone(),
            source: self.options.source_lang.clone(),
            target: self.options.target_lang.clone(),
            api_key: self.options.api_key.clone(),
        };

        let mut failures = 0;
        loop {
            match self.backend.translate(&request).await {
                Ok(texts) => {
                    if texts.len() != batch.texts.len() {
                        return Err(AuditError::Integrity {
                            expected: batch.texts.len(),
                            actual: texts.len(),
                        });
                    }
                    debug!(start = batch.start_index, rows = texts.len(), "batch translated");
                    tokio::time::sleep(self.options.chunk_delay).await;
                    return Ok(texts);
                }
                Err(AuditError::Backend(message)) => {
                    failures += 1;
                    if failures >= MAX_ATTEMPTS {
                        return Err(AuditError::RetriesExhausted {
                            attempts: failures,
                            last_error: message,
                            texts: batch.texts.clone(),
                        });
                    }
                    warn!(
                        attempt = failures,
                        start = batch.start_index,
                        "translation backend error, retrying in {}s: {}",
                        RETRY_BACKOFF.as_secs(),
                        message
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(other) => return Err(other),
            }
        }
    }
}
