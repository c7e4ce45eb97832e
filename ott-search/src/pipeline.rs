//! Title search pipeline: acquire, score, filter, sort, paginate, cache.
//!
//! # Pipeline
//!
//! 1. Reject an empty query before touching the network
//! 2. Serve from the [`ResultCache`] when the same query was answered recently
//! 3. Fetch candidates from the [`CandidateSource`] under a timeout
//! 4. Score each title against the query and drop those under the threshold
//! 5. Keep records matching the explicit year, or the two-year auto window
//! 6. Stable sort by score descending
//! 7. Slice out the requested page of [`PAGE_SIZE`]
//!
//! An acquisition failure yields an empty response with `success = false`;
//! such responses are not cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;

use crate::cache::{QueryKey, ResultCache};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::similarity;
use crate::source::CandidateSource;
use crate::sources::OttPlaySource;
use crate::types::{CandidateRecord, DetectedYear, ScoredRecord, SearchResponse};

/// Results per page.
pub const PAGE_SIZE: usize = 10;

/// A title search as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub year: Option<String>,
    /// 1-based; 0 is treated as 1.
    pub page: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            year: None,
            page: 1,
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// Which release years survive filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearFilter {
    /// Exact string match against the record's year.
    Explicit(String),
    /// Numeric year must be `current` or `current - 1`.
    Auto { current: i32 },
}

impl YearFilter {
    /// Explicit when a non-blank year was given, otherwise the auto window
    /// around `current_year`.
    pub fn for_request(year: Option<&str>, current_year: i32) -> Self {
        match year.map(str::trim).filter(|y| !y.is_empty()) {
            Some(y) => Self::Explicit(y.to_owned()),
            None => Self::Auto {
                current: current_year,
            },
        }
    }

    /// Records without a year never match.
    pub fn matches(&self, record_year: Option<&str>) -> bool {
        let Some(year) = record_year else {
            return false;
        };
        match self {
            Self::Explicit(wanted) => year == wanted,
            Self::Auto { current } => year
                .parse::<i32>()
                .is_ok_and(|y| y == *current || y == current - 1),
        }
    }

    pub fn detected_year(&self) -> DetectedYear {
        match self {
            Self::Explicit(y) => DetectedYear::Explicit(y.clone()),
            Self::Auto { current } => DetectedYear::Auto([*current, current - 1]),
        }
    }
}

/// Score, threshold, year-filter and sort `records` against `query`.
///
/// The sort is stable, so records with equal scores keep upstream order.
pub fn rank_candidates(
    query: &str,
    records: Vec<CandidateRecord>,
    filter: &YearFilter,
    threshold: f64,
) -> Vec<ScoredRecord> {
    let mut ranked: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| {
            let score = similarity::score(query, &record.title);
            ScoredRecord { record, score }
        })
        .filter(|scored| scored.score >= threshold)
        .filter(|scored| filter.matches(scored.record.year.as_deref()))
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// The `page`-th slice of [`PAGE_SIZE`] records; empty past the end.
pub fn paginate(ranked: &[ScoredRecord], page: usize) -> &[ScoredRecord] {
    let start = page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= ranked.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(ranked.len());
    &ranked[start..end]
}

/// Current calendar year from the local wall clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Title search service over one candidate source and a shared cache.
pub struct SearchPipeline {
    source: Arc<dyn CandidateSource>,
    cache: ResultCache,
    config: SearchConfig,
}

impl SearchPipeline {
    pub fn new(source: Arc<dyn CandidateSource>, cache: ResultCache, config: SearchConfig) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    /// Pipeline over the OTTplay listing source.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig, cache: ResultCache) -> Result<Self, SearchError> {
        config.validate()?;
        let source: Arc<dyn CandidateSource> = Arc::new(OttPlaySource::new(config)?);
        Ok(Self::new(source, cache, config.clone()))
    }

    /// Answer a title search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] if the query is empty, or any
    /// source error that is not an acquisition failure (e.g. a malformed
    /// listing URL). Upstream failures never surface as errors; see the
    /// module docs.
    pub async fn resolve(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.resolve_at(request, current_year()).await
    }

    /// [`resolve`](Self::resolve) with the auto-year window anchored at
    /// `current_year`.
    pub async fn resolve_at(
        &self,
        request: &SearchRequest,
        current_year: i32,
    ) -> Result<SearchResponse, SearchError> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchError::Validation(
                "Query parameter 'q' is required".into(),
            ));
        }
        let page = request.page.max(1);
        let key = QueryKey::new(query, request.year.as_deref(), page);

        if let Some(mut hit) = self.cache.get(&key).await {
            tracing::debug!(page, "search cache hit");
            // Keys are case-folded; echo this caller's spelling.
            hit.query = query.to_owned();
            return Ok(hit);
        }

        let filter = YearFilter::for_request(request.year.as_deref(), current_year);

        let records = match self.acquire(query).await {
            Ok(records) => records,
            Err(err) if err.is_acquisition_failure() => {
                tracing::warn!(source = self.source.name(), error = %err, "candidate acquisition failed");
                return Ok(SearchResponse::degraded(query, filter.detected_year(), page));
            }
            Err(err) => return Err(err),
        };
        let fetched = records.len();

        let ranked = rank_candidates(query, records, &filter, self.config.similarity_threshold);
        tracing::debug!(fetched, kept = ranked.len(), "candidates ranked");

        let response = SearchResponse {
            success: true,
            premium: true,
            cached: false,
            query: query.to_owned(),
            detected_year: filter.detected_year(),
            page,
            total_results: ranked.len(),
            results: paginate(&ranked, page).to_vec(),
        };

        self.cache.insert(key, response.clone()).await;
        Ok(response)
    }

    async fn acquire(&self, query: &str) -> Result<Vec<CandidateRecord>, SearchError> {
        let limit = Duration::from_secs(self.config.timeout_seconds);
        tokio::time::timeout(limit, self.source.fetch_candidates(query))
            .await
            .map_err(|_| {
                SearchError::Timeout(format!(
                    "{} exceeded {}s limit",
                    self.source.name(),
                    self.config.timeout_seconds
                ))
            })?
    }
}
