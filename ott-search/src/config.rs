//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls upstream endpoints, timeouts, the similarity
//! threshold, caching, and request behaviour. Every field has a default, so
//! a partial TOML table deserialises cleanly.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for title search and announcement resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Listing search page; the query is sent as the `q` parameter.
    pub listing_url: String,
    /// RSS news search endpoint used as the primary announcement source.
    pub news_feed_url: String,
    /// News search page used as the secondary announcement source.
    pub site_search_url: String,
    /// Domain the secondary search is restricted to with `site:`.
    pub site_search_domain: String,
    /// Minimum similarity a candidate title needs to be kept.
    pub similarity_threshold: f64,
    /// Maximum number of news feed items inspected per announcement query.
    pub max_news_items: usize,
    /// Per-acquisition timeout in seconds.
    pub timeout_seconds: u64,
    /// How long search responses stay cached.
    pub cache_ttl_seconds: u64,
    /// Memory bound on cached responses. Entries normally leave by TTL;
    /// reaching this bound lets the cache evict live entries early.
    pub max_cache_entries: u64,
    /// Random delay range in milliseconds `(min, max)` before each upstream
    /// request. `(0, 0)` disables it.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://www.ottplay.com/search".into(),
            news_feed_url: "https://news.google.com/rss/search".into(),
            site_search_url: "https://www.bing.com/news/search".into(),
            site_search_domain: "ottplay.com".into(),
            similarity_threshold: 0.5,
            max_news_items: 10,
            timeout_seconds: 30,
            cache_ttl_seconds: 3600,
            max_cache_entries: 1000,
            request_delay_ms: (100, 500),
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(SearchError::Config(
                "similarity_threshold must be in (0, 1]".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.cache_ttl_seconds == 0 {
            return Err(SearchError::Config(
                "cache_ttl_seconds must be greater than 0".into(),
            ));
        }
        if self.max_cache_entries == 0 {
            return Err(SearchError::Config(
                "max_cache_entries must be greater than 0".into(),
            ));
        }
        if self.site_search_domain.trim().is_empty() {
            return Err(SearchError::Config(
                "site_search_domain must not be empty".into(),
            ));
        }
        if self.max_news_items == 0 {
            return Err(SearchError::Config(
                "max_news_items must be greater than 0".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        for (name, value) in [
            ("listing_url", &self.listing_url),
            ("news_feed_url", &self.news_feed_url),
            ("site_search_url", &self.site_search_url),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(SearchError::Config(format!("{name} is not a valid URL")));
            }
        }
        Ok(())
    }
}
