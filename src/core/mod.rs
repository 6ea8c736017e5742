//! Audit engine.
//!
//! Flow: `tree` flattens the translation tree, `patterns` runs the key
//! patterns through a `search` collaborator, `classify` buckets the matches,
//! `similarity` adds closest-key hints and `report` lays out the result.

pub mod classify;
pub mod patterns;
pub mod report;
pub mod search;
pub mod similarity;
pub mod tree;
pub mod types;

pub use classify::{Classification, classify};
pub use patterns::{ExtractedMatches, KeyPattern, PatternExtractor, SearchScope};
pub use report::{AuditOptions, AuditReportBuilder};
pub use search::{CannedSearch, NativeSearch, RipgrepSearch, TextSearchPort};
pub use tree::{Resolved, TreeError, flatten, resolve, unflatten};
pub use types::{
    AuditReport, ClassifiedEntry, FlatEntry, MatchRecord, PatternKind, SourceLocation, UsageStatus,
};
