//! Core types for candidate records, search responses, and announcements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One title listing extracted from an upstream page.
///
/// Every field except `title` is optional because listing cards are noisy:
/// a card may carry no year, no poster, or no platform badges at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    /// Display title of the listing.
    pub title: String,
    /// First four-digit year (19xx/20xx) found in the card text.
    pub year: Option<String>,
    /// Poster image URL.
    pub poster_url: Option<String>,
    /// Short synopsis text.
    pub description: Option<String>,
    /// Streaming platform names, in order of appearance, without duplicates.
    pub platforms: Vec<String>,
    /// Free-form release date text, e.g. `"Mar 2024"` or `"Dec 12, 2023"`.
    pub release_date: Option<String>,
}

impl CandidateRecord {
    /// A record carrying only a title and year.
    pub fn titled(title: impl Into<String>, year: Option<&str>) -> Self {
        Self {
            title: title.into(),
            year: year.map(str::to_owned),
            poster_url: None,
            description: None,
            platforms: Vec::new(),
            release_date: None,
        }
    }
}

/// A [`CandidateRecord`] annotated with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CandidateRecord,
    /// Normalised similarity in `[0, 1]`; 1 is an exact match.
    pub score: f64,
}

/// Years a response was filtered against.
///
/// Serialises as the explicit year string, or as the `[current, previous]`
/// pair when the automatic window was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetectedYear {
    Explicit(String),
    Auto([i32; 2]),
}

/// A ranked, paginated answer to a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// False when upstream acquisition failed and the results are empty
    /// because of it rather than because nothing matched.
    pub success: bool,
    pub premium: bool,
    /// Set on copies handed out from the result cache.
    pub cached: bool,
    pub query: String,
    pub detected_year: DetectedYear,
    pub page: usize,
    /// Size of the full filtered set, independent of the page.
    pub total_results: usize,
    pub results: Vec<ScoredRecord>,
}

impl SearchResponse {
    /// An empty, flagged response for a query whose acquisition failed.
    pub fn degraded(query: &str, detected_year: DetectedYear, page: usize) -> Self {
        Self {
            success: false,
            premium: true,
            cached: false,
            query: query.to_owned(),
            detected_year,
            page,
            total_results: 0,
            results: Vec::new(),
        }
    }
}

/// One entry from the primary news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
}

impl NewsItem {
    /// Title and description joined for pattern matching.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Which announcement source produced a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Syndicated news feed, consulted first.
    Primary,
    /// Site-specific news search, consulted only when the primary has no platform.
    Secondary,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How much of an OTT release has been announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    DateAnnounced,
    PlatformOnlyAnnounced,
    NoAnnouncement,
}

/// The resolved best-guess platform and release date for a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementFact {
    pub platform: Option<String>,
    pub release_date: Option<String>,
    pub status: AnnouncementStatus,
    pub source: Option<SourceKind>,
}

impl AnnouncementFact {
    /// Build a fact, deriving `status` from which fields are present.
    pub fn new(
        platform: Option<String>,
        release_date: Option<String>,
        source: Option<SourceKind>,
    ) -> Self {
        let status = match (&platform, &release_date) {
            (_, Some(_)) => AnnouncementStatus::DateAnnounced,
            (Some(_), None) => AnnouncementStatus::PlatformOnlyAnnounced,
            (None, None) => AnnouncementStatus::NoAnnouncement,
        };
        Self {
            platform,
            release_date,
            status,
            source,
        }
    }

    /// The "nothing announced yet" state.
    pub fn none() -> Self {
        Self::new(None, None, None)
    }
}
