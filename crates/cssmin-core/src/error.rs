//! Error types for the stylesheet minifier
//!
//! All fallible operations return `Result<T, Error>`.
//! Only [`Error::UnterminatedComment`] and [`Error::Io`] abort a run. Every
//! other variant describes a single rule or declaration that was dropped from the output.

use thiserror::Error;

/// Minifier error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A `/*` with no matching `*/` (fatal)
    #[error("Unterminated comment starting at offset {offset}")]
    UnterminatedComment { offset: usize },

    /// Rule text without any `{`
    #[error("Incomplete selector: {0}")]
    IncompleteSelector(String),

    /// Rule text whose block is empty after trimming
    #[error("Empty selector body: {0}")]
    EmptySelectorBody(String),

    /// Rule block that does not end in `}`
    #[error("Unterminated selector: {0}")]
    UnterminatedSelector(String),

    /// Declaration without a `name:value` shape
    #[error("Incomplete property: {0}")]
    IncompleteProperty(String),

    /// Failure writing to the output sink (fatal)
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl Error {
    /// Whether this error aborts the whole run rather than dropping one unit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::UnterminatedComment { .. } | Error::Io(_))
    }
}

/// Result type alias for minifier operations
pub type Result<T> = std::result::Result<T, Error>;
