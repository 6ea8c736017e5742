use std::fmt;

use serde_json::Value;

/// A single leaf of a translation tree, addressed by its flat path.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    pub key: String,
    pub value: Value,
}

impl FlatEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The leaf rendered as plain text: strings unquoted, `null` empty,
    /// everything else as JSON.
    pub fn value_text(&self) -> String {
        value_text(&self.value)
    }
}

pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Literal,
    Variable,
    Interpolation,
    Concatenation,
    Loose,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Literal => "literal",
            PatternKind::Variable => "variable",
            PatternKind::Interpolation => "interpolation",
            PatternKind::Concatenation => "concatenation",
            PatternKind::Loose => "loose",
        }
    }
}

/// Where a key reference was found. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One captured key reference as reported by a search collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub raw_match: String,
    pub kind: PatternKind,
}

impl MatchRecord {
    pub fn location(&self) -> SourceLocation {
        SourceLocation {
            file: self.file.clone(),
            line: self.line,
            column: self.column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageStatus {
    Used,
    Undefined,
    Variable,
    Dynamic,
    Unused,
}

impl UsageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageStatus::Used => "USED",
            UsageStatus::Undefined => "UNDEFINED",
            UsageStatus::Variable => "VARIABLE",
            UsageStatus::Dynamic => "DYNAMIC",
            UsageStatus::Unused => "UNUSED",
        }
    }
}

impl fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key together with its usage verdict. One row of the audit report.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEntry {
    pub status: UsageStatus,
    pub key: String,
    pub value: String,
    pub similar: Option<String>,
    pub source: Option<SourceLocation>,
}

impl ClassifiedEntry {
    pub fn from_match(record: &MatchRecord, status: UsageStatus, value: String) -> Self {
        Self {
            status,
            key: record.raw_match.clone(),
            value,
            similar: None,
            source: Some(record.location()),
        }
    }
}

pub type AuditReport = Vec<ClassifiedEntry>;
