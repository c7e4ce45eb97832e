//! OTTplay listing search, the candidate source for title searches.
//!
//! Fetches the search results page and reads every `.card` element into a
//! [`CandidateRecord`]. Year and release date are pattern-matched from the
//! card's flattened text; platform badges come from image `alt` text.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extract;
use crate::http;
use crate::source::CandidateSource;
use crate::types::CandidateRecord;

/// Scraper for the OTTplay search page.
pub struct OttPlaySource {
    client: reqwest::Client,
    config: SearchConfig,
}

impl OttPlaySource {
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
        Url::parse_with_params(&self.config.listing_url, &[("q", query)])
            .map_err(|e| SearchError::Config(format!("invalid listing_url: {e}")))
    }
}

#[async_trait]
impl CandidateSource for OttPlaySource {
    async fn fetch_candidates(&self, query: &str) -> Result<Vec<CandidateRecord>, SearchError> {
        tracing::trace!(query, "listing search");
        let url = self.search_url(query)?;
        let html = http::fetch_text(&self.client, url.clone(), &self.config, self.name()).await?;
        parse_listing_html(&html, &url)
    }

    fn name(&self) -> &'static str {
        "ottplay"
    }
}

/// Parse a listing page into candidate records, in page order.
///
/// Cards without a heading are skipped. Relative poster paths are resolved
/// against `page_url`. Extracted as a separate function for testability with
/// fixture HTML.
pub(crate) fn parse_listing_html(
    html: &str,
    page_url: &Url,
) -> Result<Vec<CandidateRecord>, SearchError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse(".card")
        .map_err(|e| SearchError::Parse(format!("invalid card selector: {e:?}")))?;
    let title_sel = Selector::parse("h2")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let img_sel = Selector::parse("img")
        .map_err(|e| SearchError::Parse(format!("invalid image selector: {e:?}")))?;
    let description_sel = Selector::parse("p")
        .map_err(|e| SearchError::Parse(format!("invalid description selector: {e:?}")))?;

    let mut records = Vec::new();

    for card in document.select(&card_sel) {
        let title = match card.select(&title_sel).next() {
            Some(el) => element_text(el),
            None => continue,
        };
        if title.is_empty() {
            continue;
        }

        let text = element_text(card);

        let poster_url = card
            .select(&img_sel)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| absolute_url(page_url, src));

        let description = card
            .select(&description_sel)
            .next()
            .map(element_text)
            .filter(|d| !d.is_empty());

        let mut platforms: Vec<String> = Vec::new();
        for alt in card.select(&img_sel).filter_map(|img| img.value().attr("alt")) {
            let alt = alt.trim();
            if !alt.is_empty() && !platforms.iter().any(|p| p == alt) {
                platforms.push(alt.to_owned());
            }
        }

        records.push(CandidateRecord {
            year: extract::find_year(&text),
            release_date: extract::find_card_release_date(&text),
            title,
            poster_url,
            description,
            platforms,
        });
    }

    tracing::debug!(count = records.len(), "listing cards parsed");
    Ok(records)
}

/// `src` resolved against the page it appeared on; kept verbatim if it
/// cannot be joined.
fn absolute_url(page_url: &Url, src: &str) -> String {
    let src = src.trim();
    page_url
        .join(src)
        .map(String::from)
        .unwrap_or_else(|_| src.to_owned())
}

fn element_text(element: ElementRef<'_>) -> String {
    extract::collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}
