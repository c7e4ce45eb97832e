//! Trait definitions for pluggable upstream sources.
//!
//! The ranking pipeline only sees [`CandidateSource`]; the announcement
//! resolver only sees an ordered list of [`AnnouncementSource`]s. Concrete
//! HTTP-backed implementations live in [`crate::sources`].

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::{AnnouncementFact, CandidateRecord, SourceKind};

/// Supplies raw title listings for a query.
///
/// Implementations must tolerate empty or malformed upstream content and
/// return an empty list rather than an error when nothing can be extracted.
/// Errors are reserved for the upstream being unreachable or blocking us.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetch candidate listings for `query`, in upstream order.
    async fn fetch_candidates(&self, query: &str) -> Result<Vec<CandidateRecord>, SearchError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// One strategy in the announcement precedence chain.
#[async_trait]
pub trait AnnouncementSource: Send + Sync {
    /// Look for a platform announcement for `query`.
    ///
    /// `Ok(None)` means the source answered but mentioned no known platform.
    async fn announce(&self, query: &str) -> Result<Option<AnnouncementFact>, SearchError>;

    /// Which position in the precedence chain this source represents.
    fn kind(&self) -> SourceKind;
}
