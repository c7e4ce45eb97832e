//! In-memory result cache for search responses.
//!
//! Caches the final ranked, paginated response keyed by the (normalised
//! query, year mode, page) triple. Uses [`moka`] for async-friendly caching
//! with a fixed TTL: expired entries are never returned, and nothing is ever
//! invalidated explicitly.
//!
//! `max_entries` is a memory bound on top of the TTL. Below that bound only
//! the TTL removes entries; at it, moka may evict live entries early, which
//! costs a recompute and never returns stale data.
//!
//! The cache is a plain value. Build one per process and share it by
//! cloning; clones see the same entries. Tests build their own isolated
//! instances.

use std::time::Duration;

use moka::future::Cache;

use crate::config::SearchConfig;
use crate::types::SearchResponse;

/// Year-mode marker used in keys when no explicit year was given.
const AUTO_YEAR: &str = "auto";

/// Composite cache key: normalised query + year mode + page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Lowercased, trimmed query string.
    query: String,
    /// Trimmed explicit year, or `"auto"`.
    year: String,
    page: usize,
}

impl QueryKey {
    /// Build a deterministic key. The query is lowercased and trimmed; an
    /// absent or blank year becomes the auto marker.
    pub fn new(query: &str, year: Option<&str>, page: usize) -> Self {
        let year = year
            .map(str::trim)
            .filter(|y| !y.is_empty())
            .unwrap_or(AUTO_YEAR);
        Self {
            query: query.trim().to_lowercase(),
            year: year.to_owned(),
            page,
        }
    }
}

/// TTL-bounded memo of search responses.
#[derive(Clone)]
pub struct ResultCache {
    inner: Cache<QueryKey, SearchResponse>,
}

impl ResultCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            Duration::from_secs(config.cache_ttl_seconds),
            config.max_cache_entries,
        )
    }

    /// Look up a cached response.
    ///
    /// A hit returns a copy marked `cached = true`; the stored entry is left
    /// as it was inserted.
    pub async fn get(&self, key: &QueryKey) -> Option<SearchResponse> {
        let mut response = self.inner.get(key).await?;
        response.cached = true;
        Some(response)
    }

    /// Store a response. A later insert for the same key replaces it.
    pub async fn insert(&self, key: QueryKey, response: SearchResponse) {
        self.inner.insert(key, response).await;
    }
}
