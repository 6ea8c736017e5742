//! Conversion between nested translation trees and flat `(path, value)` leaves.
//!
//! Paths use `.` for object members and `[n]` for array elements, so
//! `{"menu": {"items": ["Open"]}}` flattens to `menu.items[0] = "Open"`.

use serde_json::{Map, Value};
use thiserror::Error;

use super::types::FlatEntry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Cannot place key '{key}': segment '{segment}' conflicts with an existing value")]
    PathConflict { key: String, segment: String },
    #[error("Cannot place key '{key}': index {index} is too far past the end of its array")]
    IndexOutOfRange { key: String, index: usize },
}

/// How many `null` slots one index may skip past the end of an array.
pub const MAX_INDEX_GAP: usize = 1024;

/// Flatten a tree into its leaves, in traversal order.
///
/// A root that is itself a leaf yields a single entry with an empty path.
/// Empty objects and arrays contribute nothing.
pub fn flatten(tree: &Value) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    flatten_into(tree, String::new(), &mut entries);
    entries
}

fn flatten_into(value: &Value, prefix: String, out: &mut Vec<FlatEntry>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(child, path, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, format!("{}[{}]", prefix, index), out);
            }
        }
        leaf => out.push(FlatEntry {
            key: prefix,
            value: leaf.clone(),
        }),
    }
}

/// Rebuild a tree from flat leaves given in any order.
///
/// New intermediate containers become arrays when the following segment is
/// purely numeric and objects otherwise. Array slots skipped by an index are
/// filled with `null`, up to [`MAX_INDEX_GAP`] of them per index.
pub fn unflatten(entries: &[FlatEntry]) -> Result<Value, TreeError> {
    let mut root = Value::Object(Map::new());

    for entry in entries {
        let segments = split_path(&entry.key);
        if segments.is_empty() {
            let root_is_empty = matches!(&root, Value::Object(map) if map.is_empty());
            if !root_is_empty {
                return Err(conflict(&entry.key, ""));
            }
            root = entry.value.clone();
            continue;
        }
        insert(&mut root, &segments, entry)?;
    }

    Ok(root)
}

fn insert(root: &mut Value, segments: &[&str], entry: &FlatEntry) -> Result<(), TreeError> {
    let mut current = root;

    for (i, segment) in segments.iter().enumerate() {
        let slot = child_slot(current, segment, &entry.key)?;

        let Some(next) = segments.get(i + 1) else {
            *slot = entry.value.clone();
            return Ok(());
        };

        if slot.is_null() {
            *slot = if is_index(next) {
                Value::Array(Vec::new())
            } else {
                Value::Object(Map::new())
            };
        } else if !slot.is_object() && !slot.is_array() {
            return Err(conflict(&entry.key, segment));
        }
        current = slot;
    }

    Ok(())
}

fn child_slot<'a>(
    container: &'a mut Value,
    segment: &str,
    key: &str,
) -> Result<&'a mut Value, TreeError> {
    match container {
        Value::Object(map) => Ok(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index: usize = segment.parse().map_err(|_| conflict(key, segment))?;
            if index.saturating_sub(items.len()) > MAX_INDEX_GAP {
                return Err(TreeError::IndexOutOfRange {
                    key: key.to_string(),
                    index,
                });
            }
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            Ok(&mut items[index])
        }
        _ => Err(conflict(key, segment)),
    }
}

fn conflict(key: &str, segment: &str) -> TreeError {
    TreeError::PathConflict {
        key: key.to_string(),
        segment: segment.to_string(),
    }
}

/// Split a flat path on `.`, `[` and `]`, dropping empty segments.
pub fn split_path(key: &str) -> Vec<&str> {
    key.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// A key reference that points at an existing node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    /// Canonical flat path of the node, as [`flatten`] would spell it.
    pub path: String,
    pub value: &'a Value,
}

/// Look a key up in the tree.
///
/// A key that is literally a member of the root object wins over path
/// interpretation. Otherwise both `items[0]` and `items.0` address the first
/// element of an array. Malformed paths (`a..b`, `a.`, `a[x]`) resolve to
/// nothing.
pub fn resolve<'a>(tree: &'a Value, key: &str) -> Option<Resolved<'a>> {
    if let Value::Object(map) = tree {
        if let Some(value) = map.get(key) {
            return Some(Resolved {
                path: key.to_string(),
                value,
            });
        }
    }

    let segments = parse_path(key)?;
    let mut current = tree;
    let mut path = String::new();

    for segment in segments {
        match current {
            Value::Object(map) => {
                current = map.get(segment)?;
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(segment);
            }
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                current = items.get(index)?;
                path.push_str(&format!("[{}]", index));
            }
            _ => return None,
        }
    }

    Some(Resolved {
        path,
        value: current,
    })
}

/// Strict path parser used for lookups: every dot-separated part must have a
/// name or a bracket index, and brackets must hold digits.
fn parse_path(key: &str) -> Option<Vec<&str>> {
    if key.is_empty() {
        return None;
    }

    let mut segments = Vec::new();
    for part in key.split('.') {
        let (head, mut rest) = match part.find('[') {
            Some(i) => (&part[..i], &part[i..]),
            None => (part, ""),
        };

        if !head.is_empty() {
            segments.push(head);
        } else if rest.is_empty() {
            return None;
        }

        while !rest.is_empty() {
            if !rest.starts_with('[') {
                return None;
            }
            let close = rest.find(']')?;
            let index = &rest[1..close];
            if !is_index(index) {
                return None;
            }
            segments.push(index);
            rest = &rest[close + 1..];
        }
    }

    Some(segments)
}

#[cfg(test)]
mod tests {
    use crate::core::tree::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn keys(entries: &[FlatEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_flatten_nested_objects_and_arrays() {
        let tree = json!({
            "app": { "title": "Hello", "count": 3 },
            "menu": { "items": ["Open", { "label": "Close" }] }
        });

        let entries = flatten(&tree);
        assert_eq!(
            keys(&entries),
            vec!["app.title", "app.count", "menu.items[0]", "menu.items[1].label"]
        );
        assert_eq!(entries[1].value, json!(3));
        assert_eq!(entries[3].value, json!("Close"));
    }

    #[test]
    fn test_flatten_root_leaf() {
        let entries = flatten(&json!("alone"));
        assert_eq!(entries, vec![FlatEntry::new("", "alone")]);
    }

    #[test]
    fn test_flatten_skips_empty_containers() {
        let entries = flatten(&json!({ "a": {}, "b": [], "c": "x" }));
        assert_eq!(keys(&entries), vec!["c"]);
    }

    #[test]
    fn test_unflatten_round_trip() {
        let tree = json!({
            "app": { "title": "Hello", "enabled": true, "missing": null },
            "menu": { "items": ["Open", { "label": "Close" }] },
            "matrix": [["a", "b"], ["c"]]
        });

        let rebuilt = unflatten(&flatten(&tree)).unwrap();
        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn test_unflatten_out_of_order_is_canonicalised() {
        let entries = vec![
            FlatEntry::new("b.x", "1"),
            FlatEntry::new("a", "2"),
            FlatEntry::new("b.y", "3"),
        ];

        let tree = unflatten(&entries).unwrap();
        assert_eq!(tree, json!({ "b": { "x": "1", "y": "3" }, "a": "2" }));

        // Re-flattening groups keys by first appearance in traversal order.
        let again = flatten(&tree);
        assert_eq!(keys(&again), vec!["b.x", "b.y", "a"]);
        assert_eq!(flatten(&unflatten(&again).unwrap()), again);
    }

    #[test]
    fn test_unflatten_chooses_array_for_numeric_segment() {
        let tree = unflatten(&[
            FlatEntry::new("list[1]", "second"),
            FlatEntry::new("list[0]", "first"),
            FlatEntry::new("dotted.0", "zero"),
            FlatEntry::new("named.x", "x"),
            FlatEntry::new("named.0", "zero"),
        ])
        .unwrap();

        // An existing object keeps numeric segments as member names.
        assert_eq!(
            tree,
            json!({
                "list": ["first", "second"],
                "dotted": ["zero"],
                "named": { "x": "x", "0": "zero" }
            })
        );
    }

    #[test]
    fn test_unflatten_pads_sparse_arrays() {
        let tree = unflatten(&[FlatEntry::new("list[2]", "c")]).unwrap();
        assert_eq!(tree, json!({ "list": [null, null, "c"] }));
    }

    #[test]
    fn test_unflatten_rejects_huge_indices() {
        for key in ["list[18446744073709551615]", "list[4000000000]", "list[1025]"] {
            let result = unflatten(&[FlatEntry::new(key, "x")]);
            assert!(
                matches!(result, Err(TreeError::IndexOutOfRange { .. })),
                "{}",
                key
            );
        }
    }

    #[test]
    fn test_unflatten_index_gap_is_relative_to_length() {
        let mut entries: Vec<FlatEntry> = (0..10)
            .map(|i| FlatEntry::new(format!("list[{}]", i), "x"))
            .collect();
        entries.push(FlatEntry::new("list[1034]", "last"));

        let tree = unflatten(&entries).unwrap();
        assert_eq!(tree["list"].as_array().unwrap().len(), 1035);
        assert_eq!(tree["list"][1034], json!("last"));
    }

    #[test]
    fn test_unflatten_overlong_index_is_a_conflict() {
        let result = unflatten(&[
            FlatEntry::new("list[0].x", "a"),
            FlatEntry::new("list[99999999999999999999]", "b"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unflatten_root_leaf() {
        let tree = unflatten(&[FlatEntry::new("", "alone")]).unwrap();
        assert_eq!(tree, json!("alone"));
    }

    #[test]
    fn test_unflatten_conflict_through_scalar() {
        let result = unflatten(&[FlatEntry::new("a", "x"), FlatEntry::new("a.b", "y")]);
        assert_eq!(
            result,
            Err(TreeError::PathConflict {
                key: "a.b".to_string(),
                segment: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_unflatten_conflict_named_member_on_array() {
        let result = unflatten(&[
            FlatEntry::new("list[0]", "x"),
            FlatEntry::new("list.name", "y"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let tree = json!({
            "app": { "title": "Hello" },
            "menu": { "items": ["Open", { "label": "Close" }] },
            "flat.key": "direct"
        });

        let resolved = resolve(&tree, "app.title").unwrap();
        assert_eq!(resolved.path, "app.title");
        assert_eq!(resolved.value, &json!("Hello"));

        let bracket = resolve(&tree, "menu.items[1].label").unwrap();
        assert_eq!(bracket.path, "menu.items[1].label");

        let dotted = resolve(&tree, "menu.items.1.label").unwrap();
        assert_eq!(dotted.path, "menu.items[1].label");
        assert_eq!(dotted.value, &json!("Close"));

        assert_eq!(resolve(&tree, "flat.key").unwrap().value, &json!("direct"));
        assert_eq!(resolve(&tree, "app").unwrap().path, "app");
    }

    #[test]
    fn test_resolve_missing_or_malformed() {
        let tree = json!({ "app": { "title": "Hello" }, "list": ["a"] });

        assert!(resolve(&tree, "app.subtitle").is_none());
        assert!(resolve(&tree, "app.title.deeper").is_none());
        assert!(resolve(&tree, "app.").is_none());
        assert!(resolve(&tree, "app..title").is_none());
        assert!(resolve(&tree, "list[x]").is_none());
        assert!(resolve(&tree, "list[3]").is_none());
        assert!(resolve(&tree, "").is_none());
    }
}
