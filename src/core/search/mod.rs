//! Text-search collaborators.
//!
//! The audit never reads source files itself: it hands each key pattern to a
//! [`TextSearchPort`] and gets back match records sorted by path, line and
//! column. [`RipgrepSearch`] shells out to `rg`, [`NativeSearch`] scans in
//! process, and [`CannedSearch`] replays fixed records.

mod native;
mod ripgrep;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use regex::{Captures, Regex};

pub use native::NativeSearch;
pub use ripgrep::RipgrepSearch;

use super::patterns::KeyPattern;
use super::types::{MatchRecord, PatternKind};
use crate::error::{AuditError, Result};

#[async_trait]
pub trait TextSearchPort: Send + Sync {
    /// Run one pattern over `roots`, skipping paths matched by `exclusions`.
    ///
    /// Returns one record per match carrying the text of the `key` group.
    async fn search(
        &self,
        pattern: &KeyPattern,
        exclusions: &[String],
        roots: &[PathBuf],
    ) -> Result<Vec<MatchRecord>>;

    fn name(&self) -> &str;
}

/// Text of the first `key*` group that took part in the match.
pub(crate) fn captured_key<'h>(regex: &Regex, caps: &Captures<'h>) -> Option<&'h str> {
    regex
        .capture_names()
        .flatten()
        .filter(|name| name.starts_with("key"))
        .find_map(|name| caps.name(name))
        .map(|m| m.as_str())
}

/// Search port that answers from a fixed list of records.
#[derive(Debug, Default)]
pub struct CannedSearch {
    records: Vec<MatchRecord>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl CannedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        kind: PatternKind,
        file: &str,
        line: usize,
        column: usize,
        key: &str,
    ) -> Self {
        self.records.push(MatchRecord {
            file: file.to_string(),
            line,
            column,
            raw_match: key.to_string(),
            kind,
        });
        self
    }

    /// Make every search fail as a crashed collaborator would.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextSearchPort for CannedSearch {
    async fn search(
        &self,
        pattern: &KeyPattern,
        _exclusions: &[String],
        _roots: &[PathBuf],
    ) -> Result<Vec<MatchRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(AuditError::Collaborator(message.clone()));
        }
        Ok(self
            .records
            .iter()
            .filter(|record| record.kind == pattern.kind)
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "canned"
    }
}
