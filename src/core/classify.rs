//! Usage classification of raw matches against the translation tree.

use std::collections::HashSet;

use serde_json::Value;

use super::patterns::ExtractedMatches;
use super::tree::resolve;
use super::types::{ClassifiedEntry, FlatEntry, MatchRecord, PatternKind, UsageStatus, value_text};

/// Classified entries, one bucket per usage category.
///
/// Every bucket keeps discovery order: match-derived buckets follow the
/// collaborator's (file, line, column) order, `unused` follows tree order.
/// Within a bucket a key appears once; the first occurrence keeps its source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub used: Vec<ClassifiedEntry>,
    pub undefined: Vec<ClassifiedEntry>,
    /// Variable references first, then interpolations and concatenations.
    pub dynamic: Vec<ClassifiedEntry>,
    pub unused: Vec<ClassifiedEntry>,
}

/// Bucket matches and tree leaves into usage categories.
///
/// Literal keys are looked up in `tree` itself rather than in `entries`, so
/// `items.0` and `items[0]` both reach the same array element. Loose strings
/// only ever count as usage: a quoted string that names no key is dropped.
pub fn classify(tree: &Value, entries: &[FlatEntry], matches: &ExtractedMatches) -> Classification {
    let mut classification = Classification::default();
    let mut used_keys: HashSet<String> = HashSet::new();
    let mut undefined_keys: HashSet<String> = HashSet::new();

    for record in matches.literal.iter().chain(&matches.loose) {
        match resolve(tree, &record.raw_match) {
            Some(resolved) => {
                if used_keys.insert(resolved.path.clone()) {
                    let value = if resolved.value.is_object() || resolved.value.is_array() {
                        String::new()
                    } else {
                        value_text(resolved.value)
                    };
                    let mut entry = ClassifiedEntry::from_match(record, UsageStatus::Used, value);
                    entry.key = resolved.path;
                    classification.used.push(entry);
                }
            }
            None if record.kind == PatternKind::Literal => {
                if undefined_keys.insert(record.raw_match.clone()) {
                    classification.undefined.push(ClassifiedEntry::from_match(
                        record,
                        UsageStatus::Undefined,
                        String::new(),
                    ));
                }
            }
            None => {}
        }
    }

    push_unique(&mut classification.dynamic, &matches.variable, UsageStatus::Variable);
    let dynamic_records: Vec<MatchRecord> = matches
        .interpolation
        .iter()
        .chain(&matches.concatenation)
        .cloned()
        .collect();
    push_unique(&mut classification.dynamic, &dynamic_records, UsageStatus::Dynamic);

    classification.unused = entries
        .iter()
        .filter(|entry| !used_keys.contains(&entry.key))
        .map(|entry| ClassifiedEntry {
            status: UsageStatus::Unused,
            key: entry.key.clone(),
            value: entry.value_text(),
            similar: None,
            source: None,
        })
        .collect();

    classification
}

fn push_unique(bucket: &mut Vec<ClassifiedEntry>, records: &[MatchRecord], status: UsageStatus) {
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        if seen.insert(record.raw_match.as_str()) {
            bucket.push(ClassifiedEntry::from_match(record, status, String::new()));
        }
    }
}
