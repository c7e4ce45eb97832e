//! Error types for the ott-search crate.
//!
//! Messages are stable strings suitable for logs. Only [`SearchError::Validation`]
//! is meant to reach an end user verbatim.

/// Errors that can occur while resolving a title query.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A required query parameter was missing or empty.
    #[error("validation error: {0}")]
    Validation(String),

    /// An acquisition step did not finish within its time budget.
    #[error("acquisition timed out: {0}")]
    Timeout(String),

    /// An HTTP request to an upstream source failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Upstream content could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Whether this error came from contacting or reading an upstream source.
    ///
    /// Acquisition failures are recovered locally by the pipeline and the
    /// announcement resolver; they never reach the caller as hard failures.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Http(_) | Self::Parse(_))
    }
}

/// Convenience type alias for ott-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
