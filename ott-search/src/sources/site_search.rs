//! Site-restricted news search, the secondary announcement source.
//!
//! Runs `site:<domain> <title> OTT release date` against a news search page
//! and scans the page's visible text as one blob.

use async_trait::async_trait;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extract;
use crate::http;
use crate::source::AnnouncementSource;
use crate::types::{AnnouncementFact, SourceKind};

pub struct SiteSearchSource {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SiteSearchSource {
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: http::build_client(config)?,
            config: config.clone(),
        })
    }

    fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        let q = format!(
            "site:{} {query} OTT release date",
            self.config.site_search_domain.trim()
        );
        Url::parse_with_params(&self.config.site_search_url, &[("q", q.as_str())])
            .map_err(|e| SearchError::Config(format!("invalid site_search_url: {e}")))
    }

    /// Fetch the visible text of the search results page for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] when the page cannot be fetched.
    pub async fn fetch_text(&self, query: &str) -> Result<String, SearchError> {
        tracing::trace!(query, "site search");
        let url = self.search_url(query)?;
        let html = http::fetch_text(&self.client, url, &self.config, "site search").await?;
        Ok(extract::visible_text(&html))
    }
}

#[async_trait]
impl AnnouncementSource for SiteSearchSource {
    async fn announce(&self, query: &str) -> Result<Option<AnnouncementFact>, SearchError> {
        let text = self.fetch_text(query).await?;
        Ok(announcement_from_text(&text, self.kind()))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Secondary
    }
}

/// Extract an announcement from a raw text blob; present only when a
/// platform is named.
pub fn announcement_from_text(text: &str, kind: SourceKind) -> Option<AnnouncementFact> {
    let extraction = extract::extract_announcement(text);
    extraction
        .platform
        .map(|platform| AnnouncementFact::new(Some(platform), extraction.release_date, Some(kind)))
}
