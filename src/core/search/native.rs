use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use glob::Pattern;
use regex::Regex;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::{TextSearchPort, captured_key};
use crate::core::patterns::KeyPattern;
use crate::core::types::MatchRecord;
use crate::error::{AuditError, Result};

/// Directories that are never worth scanning.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// In-process scanner: walks the roots in path order and runs the
/// `regex`-dialect pattern line by line, like `rg -o --sort path` would.
///
/// Hidden entries and `node_modules` are skipped. Files that are not valid
/// UTF-8 are treated as binary and skipped.
#[derive(Debug, Clone, Default)]
pub struct NativeSearch;

impl NativeSearch {
    pub fn new() -> Self {
        Self
    }

    fn scan(
        &self,
        regex: &Regex,
        pattern: &KeyPattern,
        exclusions: &[Pattern],
        roots: &[PathBuf],
    ) -> Result<Vec<MatchRecord>> {
        let default_root = [PathBuf::from(".")];
        let roots = if roots.is_empty() { &default_root[..] } else { roots };
        let mut records = Vec::new();

        for root in roots {
            if !root.exists() {
                return Err(AuditError::Collaborator(format!(
                    "{}: No such file or directory",
                    root.display()
                )));
            }

            let walker = WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !is_skipped(entry));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(error = %err, "skipping unreadable entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() || is_excluded(entry.path(), root, exclusions) {
                    continue;
                }

                let Ok(content) = fs::read_to_string(entry.path()) else {
                    debug!(path = %entry.path().display(), "skipping non-UTF-8 file");
                    continue;
                };

                let file = entry.path().to_string_lossy().to_string();
                scan_content(regex, pattern, &file, &content, &mut records);
            }
        }

        Ok(records)
    }
}

fn scan_content(
    regex: &Regex,
    pattern: &KeyPattern,
    file: &str,
    content: &str,
    records: &mut Vec<MatchRecord>,
) {
    for (index, line) in content.lines().enumerate() {
        for caps in regex.captures_iter(line) {
            let (Some(whole), Some(key)) = (caps.get(0), captured_key(regex, &caps)) else {
                continue;
            };
            records.push(MatchRecord {
                file: file.to_string(),
                line: index + 1,
                column: whole.start() + 1,
                raw_match: key.to_string(),
                kind: pattern.kind,
            });
        }
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && SKIPPED_DIRS.contains(&name.as_ref()))
}

/// Globs match the path as walked, the path relative to its root, or, for
/// globs without a separator, the bare file name.
fn is_excluded(path: &Path, root: &Path, exclusions: &[Pattern]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let file_name = path.file_name().map(Path::new);

    exclusions.iter().any(|pattern| {
        pattern.matches_path(path)
            || pattern.matches_path(relative)
            || (!pattern.as_str().contains('/')
                && file_name.is_some_and(|name| pattern.matches_path(name)))
    })
}

#[async_trait]
impl TextSearchPort for NativeSearch {
    async fn search(
        &self,
        pattern: &KeyPattern,
        exclusions: &[String],
        roots: &[PathBuf],
    ) -> Result<Vec<MatchRecord>> {
        let regex = Regex::new(pattern.native)
            .map_err(|e| AuditError::Collaborator(format!("invalid pattern: {}", e)))?;
        let exclusions = exclusions
            .iter()
            .map(|glob| {
                Pattern::new(glob.trim_start_matches("./")).map_err(|e| {
                    AuditError::Collaborator(format!("invalid exclusion glob \"{}\": {}", glob, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.scan(&regex, pattern, &exclusions, roots)
    }

    fn name(&self) -> &str {
        "native"
    }
}
