//! OTT release announcement resolution across several news sources.
//!
//! Sources are consulted strictly in order. The first one that names a
//! platform decides the answer and later sources are never contacted.
//! A failing or timed-out source is logged and skipped; it never fails the
//! whole resolution.

use std::sync::Arc;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::source::AnnouncementSource;
use crate::sources::{NewsFeedSource, SiteSearchSource};
use crate::types::AnnouncementFact;

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementReport {
    pub fact: AnnouncementFact,
    /// False only when every source failed to answer.
    pub responded: bool,
}

/// Walks an ordered list of [`AnnouncementSource`]s.
pub struct AnnouncementResolver {
    strategies: Vec<Arc<dyn AnnouncementSource>>,
    timeout: Duration,
}

impl AnnouncementResolver {
    pub fn new(strategies: Vec<Arc<dyn AnnouncementSource>>, timeout: Duration) -> Self {
        Self {
            strategies,
            timeout,
        }
    }

    /// The news feed first, then the site-restricted search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if an HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let primary: Arc<dyn AnnouncementSource> = Arc::new(NewsFeedSource::new(config)?);
        let secondary: Arc<dyn AnnouncementSource> = Arc::new(SiteSearchSource::new(config)?);
        Ok(Self::new(
            vec![primary, secondary],
            Duration::from_secs(config.timeout_seconds),
        ))
    }

    /// Resolve the best-guess announcement for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] if the query is empty.
    pub async fn resolve(&self, query: &str) -> Result<AnnouncementReport, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::Validation(
                "Query parameter 'q' is required".into(),
            ));
        }

        let mut responded = false;

        for strategy in &self.strategies {
            let kind = strategy.kind();
            let outcome = tokio::time::timeout(self.timeout, strategy.announce(query))
                .await
                .unwrap_or_else(|_| {
                    Err(SearchError::Timeout(format!(
                        "{kind} source exceeded {}s limit",
                        self.timeout.as_secs()
                    )))
                });

            match outcome {
                Ok(Some(fact)) => {
                    tracing::debug!(source = %kind, platform = ?fact.platform, "announcement found");
                    return Ok(AnnouncementReport {
                        fact,
                        responded: true,
                    });
                }
                Ok(None) => {
                    tracing::debug!(source = %kind, "no platform mentioned");
                    responded = true;
                }
                Err(err) => {
                    tracing::warn!(source = %kind, error = %err, "announcement source failed");
                }
            }
        }

        Ok(AnnouncementReport {
            fact: AnnouncementFact::none(),
            responded,
        })
    }
}
