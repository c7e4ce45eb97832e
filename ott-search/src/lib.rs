//! # ott-search
//!
//! "Where and when can I stream this title?" answered from scraped text.
//!
//! ## Design
//!
//! - Scrapes a streaming-guide listing page and reads each card into a
//!   [`CandidateRecord`]
//! - Ranks candidates by normalised edit-distance similarity to the query,
//!   filters by explicit year or a two-year automatic window, paginates
//! - Caches final responses in memory with a fixed TTL
//! - Resolves a single OTT release announcement from a news feed, falling
//!   back to a site-restricted news search
//! - Graceful degradation: upstream failures produce flagged empty answers,
//!   never hard errors
//!
//! Query text is logged only at trace level.

pub mod announcement;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod pipeline;
pub mod similarity;
pub mod source;
pub mod sources;
pub mod types;

pub use announcement::{AnnouncementReport, AnnouncementResolver};
pub use cache::{QueryKey, ResultCache};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use pipeline::{SearchPipeline, SearchRequest, PAGE_SIZE};
pub use source::{AnnouncementSource, CandidateSource};
pub use types::{
    AnnouncementFact, AnnouncementStatus, CandidateRecord, DetectedYear, NewsItem, ScoredRecord,
    SearchResponse, SourceKind,
};

/// Build the title search pipeline and announcement resolver for `config`,
/// sharing a freshly constructed result cache.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, or
/// [`SearchError::Http`] if an HTTP client cannot be built.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> ott_search::Result<()> {
/// let (pipeline, _resolver) = ott_search::build(&ott_search::SearchConfig::default())?;
/// let response = pipeline
///     .resolve(&ott_search::SearchRequest::new("Interstellar"))
///     .await?;
/// for hit in &response.results {
///     println!("{} ({:.2})", hit.record.title, hit.score);
/// }
/// # Ok(())
/// # }
/// ```
pub fn build(config: &SearchConfig) -> Result<(SearchPipeline, AnnouncementResolver)> {
    let cache = ResultCache::from_config(config);
    let pipeline = SearchPipeline::from_config(config, cache)?;
    let resolver = AnnouncementResolver::from_config(config)?;
    Ok((pipeline, resolver))
}
