use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::TextSearchPort;
use crate::core::patterns::KeyPattern;
use crate::core::types::{MatchRecord, PatternKind};
use crate::error::{AuditError, Result};

/// Search collaborator backed by the `rg` executable.
///
/// Each pattern is one `rg` process whose whole output is buffered before
/// the next one starts. Exit code 1 only means "no matches".
#[derive(Debug, Clone)]
pub struct RipgrepSearch {
    binary: PathBuf,
}

impl Default for RipgrepSearch {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("rg"),
        }
    }
}

impl RipgrepSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments for one scan: vimgrep output, only the `key` group, sorted by path.
    pub fn build_args(pattern: &KeyPattern, exclusions: &[String], roots: &[PathBuf]) -> Vec<String> {
        let mut args = vec!["--vimgrep".to_string(), "--pcre2".to_string(), "-o".to_string()];
        for exclusion in exclusions {
            args.push("-g".to_string());
            args.push(format!("!{}", exclusion));
        }
        args.extend(["-r", "$key", "--sort", "path"].map(String::from));
        args.push("--".to_string());
        args.push(pattern.pcre.to_string());
        if roots.is_empty() {
            args.push(".".to_string());
        } else {
            args.extend(roots.iter().map(|root| root.to_string_lossy().to_string()));
        }
        args
    }
}

#[async_trait]
impl TextSearchPort for RipgrepSearch {
    async fn search(
        &self,
        pattern: &KeyPattern,
        exclusions: &[String],
        roots: &[PathBuf],
    ) -> Result<Vec<MatchRecord>> {
        let args = Self::build_args(pattern, exclusions, roots);
        debug!(binary = %self.binary.display(), ?args, "spawning ripgrep");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                AuditError::Collaborator(format!(
                    "failed to run {}: {} (is ripgrep installed?)",
                    self.binary.display(),
                    e
                ))
            })?;

        match output.status.code() {
            Some(0) | Some(1) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                Ok(parse_vimgrep(&stdout, pattern.kind))
            }
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                Err(AuditError::Collaborator(if stderr.is_empty() {
                    format!("rg exited with code {:?}", code)
                } else {
                    stderr
                }))
            }
        }
    }

    fn name(&self) -> &str {
        "ripgrep"
    }
}

/// Parse `file:line:column:text` lines. The text may itself contain colons.
pub fn parse_vimgrep(stdout: &str, kind: PatternKind) -> Vec<MatchRecord> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let record = parse_vimgrep_line(line, kind);
            if record.is_none() {
                warn!(line, "skipping unparsable ripgrep output line");
            }
            record
        })
        .collect()
}

fn parse_vimgrep_line(line: &str, kind: PatternKind) -> Option<MatchRecord> {
    let mut parts = line.splitn(4, ':');
    let file = parts.next()?;
    let line_number = parts.next()?.parse().ok()?;
    let column = parts.next()?.parse().ok()?;
    let raw_match = parts.next()?;

    Some(MatchRecord {
        file: file.to_string(),
        line: line_number,
        column,
        raw_match: raw_match.to_string(),
        kind,
    })
}
