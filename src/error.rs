use std::path::PathBuf;

use thiserror::Error;

/// Fatal and recoverable failures of an audit or translation run.
///
/// Every variant except [`AuditError::Backend`] aborts the run. Backend
/// errors are retried by the translation pipeline until its budget runs out,
/// at which point they surface as [`AuditError::RetriesExhausted`].
#[derive(Debug, Error)]
pub enum AuditError {
    /// Conflicting or malformed options, detected before any work starts.
    #[error("{0}")]
    Configuration(String),

    /// Missing, unreadable or unsupported input file.
    #[error("{message}: {}", path.display())]
    Input { path: PathBuf, message: String },

    /// The text-search collaborator failed (anything but "matches" / "no matches").
    #[error("Search failed: {0}")]
    Collaborator(String),

    /// The backend cannot translate between the requested languages.
    #[error("{role} language '{code}' is not supported by {backend}")]
    UnsupportedLanguage {
        role: LanguageRole,
        code: String,
        backend: String,
    },

    /// A single request was rejected by the translation backend.
    #[error("Error from translation backend: {0}")]
    Backend(String),

    /// A batch kept failing after every allowed attempt.
    #[error(
        "Keep getting errors from the translation backend, giving up after {attempts} attempts.\nLast error: {last_error}\nFailed batch: {texts:?}"
    )]
    RetriesExhausted {
        attempts: usize,
        last_error: String,
        texts: Vec<String>,
    },

    /// Reassembled output does not line up with the input.
    #[error("Translated row count differs from original | new length: {actual}, original: {expected}")]
    Integrity { expected: usize, actual: usize },

    /// A result could not be rendered in the requested format.
    #[error("{0}")]
    Output(String),

    #[error(transparent)]
    Tree(#[from] crate::core::TreeError),
}

/// Which side of a translation a language code was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRole {
    Source,
    Target,
}

impl std::fmt::Display for LanguageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageRole::Source => write!(f, "Source"),
            LanguageRole::Target => write!(f, "Target"),
        }
    }
}

impl AuditError {
    pub fn input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
