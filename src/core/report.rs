//! Audit report assembly.
//!
//! [`AuditReportBuilder`] is the single audit entry point: it runs the
//! extraction passes, classifies the matches, attaches similarity hints and
//! lays the rows out in report order.

use serde_json::Value;
use tracing::info;

use super::classify::{Classification, classify};
use super::patterns::{PatternExtractor, SearchScope};
use super::search::TextSearchPort;
use super::similarity::attach_similar;
use super::tree::flatten;
use super::types::{AuditReport, FlatEntry, UsageStatus};
use crate::error::Result;

/// Knobs that differ between audit flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    /// Keep the `file:line:column` of match-derived rows.
    pub include_source: bool,
    /// Also scan for any quoted string that happens to name a key.
    pub loose_search: bool,
    /// Leave out keys that are referenced but have no translation.
    pub suppress_attention: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            include_source: true,
            loose_search: false,
            suppress_attention: false,
        }
    }
}

pub struct AuditReportBuilder {
    options: AuditOptions,
}

impl AuditReportBuilder {
    pub fn new(options: AuditOptions) -> Self {
        Self { options }
    }

    /// Scan `scope` for references to the keys of `tree` and build the report.
    pub async fn audit(
        &self,
        port: &dyn TextSearchPort,
        scope: &SearchScope,
        tree: &Value,
    ) -> Result<AuditReport> {
        let entries = flatten(tree);
        let matches = PatternExtractor::new(self.options.loose_search)
            .extract(port, scope)
            .await?;

        let mut classification = classify(tree, &entries, &matches);
        resolve_similar(&mut classification, &entries);

        info!(
            matches = matches.total(),
            used = classification.used.len(),
            undefined = classification.undefined.len(),
            dynamic = classification.dynamic.len(),
            unused = classification.unused.len(),
            "audit classified"
        );

        Ok(self.build(classification))
    }

    /// Lay out the buckets: referenced keys (used or undefined, in source
    /// order), then dynamic references in discovery order, then unused keys in
    /// tree order.
    pub fn build(&self, classification: Classification) -> AuditReport {
        let Classification {
            used,
            undefined,
            dynamic,
            unused,
        } = classification;

        let mut referenced = used;
        if !self.options.suppress_attention {
            referenced.extend(undefined);
        }
        // Stable, so entries from the same location keep their bucket order.
        referenced.sort_by(|a, b| {
            let a = a.source.as_ref().map(|s| (&s.file, s.line, s.column));
            let b = b.source.as_ref().map(|s| (&s.file, s.line, s.column));
            a.cmp(&b)
        });

        let mut report: AuditReport = referenced;
        report.extend(dynamic);
        report.extend(unused);

        if !self.options.include_source {
            for entry in &mut report {
                entry.source = None;
            }
        }
        report
    }
}

/// Attach similarity hints in both directions.
///
/// Dynamic references look for the closest tree key; variable references are
/// bare identifiers and get no hint. Unused tree keys look for the closest
/// dynamic or variable reference. Neither direction implies the other.
pub fn resolve_similar(classification: &mut Classification, entries: &[FlatEntry]) {
    let tree_keys: Vec<&str> = entries.iter().map(|entry| entry.key.as_str()).collect();
    attach_similar(
        classification
            .dynamic
            .iter_mut()
            .filter(|entry| entry.status == UsageStatus::Dynamic),
        &tree_keys,
    );

    let dynamic_keys: Vec<String> = classification
        .dynamic
        .iter()
        .map(|entry| entry.key.clone())
        .collect();
    let dynamic_keys: Vec<&str> = dynamic_keys.iter().map(String::as_str).collect();
    attach_similar(classification.unused.iter_mut(), &dynamic_keys);
}
