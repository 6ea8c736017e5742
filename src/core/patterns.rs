//! Lexical key-reference patterns and the extractor that runs them.
//!
//! Every pattern names the referenced key with a capture group called `key`.
//! Each one is kept in two dialects: PCRE2 for `rg --pcre2`, and a form the
//! `regex` crate accepts (no look-around, no back-references) for the native
//! scanner. When a native pattern needs several alternatives, each alternative
//! gets its own group whose name starts with `key`.

use std::path::PathBuf;

use tracing::debug;

use super::search::TextSearchPort;
use super::types::{MatchRecord, PatternKind};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPattern {
    pub kind: PatternKind,
    pub pcre: &'static str,
    pub native: &'static str,
}

/// `t('key')` / `$t("key", opts)`: a quoted first argument closed by `,` or `)`.
pub const LITERAL: KeyPattern = KeyPattern {
    kind: PatternKind::Literal,
    pcre: r#"(?:\$|\.|\s)t\s*\(\s*(['"])(?<key>(?:\\.|(?!\1).)*?)\1\s*(?=[,)])"#,
    native: r#"(?:\$|\.|\s)t\s*\(\s*(?:'(?P<key>(?:\\.|[^'\\])*)'|"(?P<key_dq>(?:\\.|[^"\\])*)")\s*[,)]"#,
};

/// `t(someKey)`: an unquoted first argument.
pub const VARIABLE: KeyPattern = KeyPattern {
    kind: PatternKind::Variable,
    pcre: r#"(?:\$|\.|\s)t\s*\(\s*(?!['"`])(?<key>[^'"`][^)]*?)\s*(?=[,)])"#,
    native: r#"(?:\$|\.|\s)t\s*\(\s*(?P<key>[^'"`\s)][^)]*?)\s*[,)]"#,
};

/// ``t(`menu.${id}`)``: a template literal argument.
pub const INTERPOLATION: KeyPattern = KeyPattern {
    kind: PatternKind::Interpolation,
    pcre: r#"(?:\$|\.|\s)t\(\s*`(?<key>[^`]+)`"#,
    native: r#"(?:\$|\.|\s)t\(\s*`(?P<key>[^`]+)`"#,
};

/// `t('menu.' + id)`: a quoted prefix joined to an identifier.
pub const CONCATENATION: KeyPattern = KeyPattern {
    kind: PatternKind::Concatenation,
    pcre: r#"(?:\$|\.|\s)t\(\s*(?<key>(?:'[^']*'|"[^"]*")\s*\+\s*[a-zA-Z_]\w*)"#,
    native: r#"(?:\$|\.|\s)t\(\s*(?P<key>(?:'[^']*'|"[^"]*")\s*\+\s*[a-zA-Z_]\w*)"#,
};

/// Any quoted string, wherever it appears.
pub const LOOSE: KeyPattern = KeyPattern {
    kind: PatternKind::Loose,
    pcre: r#"(['"])(?<key>(?:\\.|(?!\1).)*?)\1"#,
    native: r#"'(?P<key>(?:\\.|[^'\\])*)'|"(?P<key_dq>(?:\\.|[^"\\])*)""#,
};

/// Directories to scan and globs to leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchScope {
    pub roots: Vec<PathBuf>,
    pub exclusions: Vec<String>,
}

/// Raw matches of one extraction pass, grouped by the pattern that found them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMatches {
    pub literal: Vec<MatchRecord>,
    pub variable: Vec<MatchRecord>,
    pub interpolation: Vec<MatchRecord>,
    pub concatenation: Vec<MatchRecord>,
    pub loose: Vec<MatchRecord>,
}

impl ExtractedMatches {
    pub fn total(&self) -> usize {
        self.literal.len()
            + self.variable.len()
            + self.interpolation.len()
            + self.concatenation.len()
            + self.loose.len()
    }

    fn slot(&mut self, kind: PatternKind) -> &mut Vec<MatchRecord> {
        match kind {
            PatternKind::Literal => &mut self.literal,
            PatternKind::Variable => &mut self.variable,
            PatternKind::Interpolation => &mut self.interpolation,
            PatternKind::Concatenation => &mut self.concatenation,
            PatternKind::Loose => &mut self.loose,
        }
    }
}

/// Runs the key patterns one after another through a search collaborator.
pub struct PatternExtractor {
    patterns: Vec<KeyPattern>,
}

impl PatternExtractor {
    pub fn new(loose_search: bool) -> Self {
        let mut patterns = vec![LITERAL, VARIABLE, INTERPOLATION, CONCATENATION];
        if loose_search {
            patterns.push(LOOSE);
        }
        Self { patterns }
    }

    pub fn patterns(&self) -> &[KeyPattern] {
        &self.patterns
    }

    /// Scan the scope once per pattern.
    ///
    /// Scans are awaited one at a time. Records are kept exactly as the
    /// collaborator reports them; nothing is deduplicated here.
    pub async fn extract(
        &self,
        port: &dyn TextSearchPort,
        scope: &SearchScope,
    ) -> Result<ExtractedMatches> {
        let mut matches = ExtractedMatches::default();

        for pattern in &self.patterns {
            let records = port
                .search(pattern, &scope.exclusions, &scope.roots)
                .await?;
            debug!(
                pattern = pattern.kind.as_str(),
                searcher = port.name(),
                count = records.len(),
                "scanned sources"
            );
            matches.slot(pattern.kind).extend(records);
        }

        Ok(matches)
    }
}
