//! Google News RSS search, the primary announcement source.
//!
//! Queries the feed for `"<title> OTT release"`, reads up to
//! `max_news_items` `<item>` entries and reports the first one that names a
//! known platform.

use async_trait::async_trait;
use quick_xml::events::Event;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extract;
use crate::http;
use crate::source::AnnouncementSource;
use crate::types::{AnnouncementFact, NewsItem, SourceKind};

/// RSS news search client.
pub struct NewsFeedSource {
    client: reqwest::Client,
    config: SearchConfig,
}

impl NewsFeedSource {
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: http::build_client(config)?,
            config: config.clone(),
        })
    }

    fn feed_url(&self, query: &str) -> Result<Url, SearchError> {
        let q = format!("{query} OTT release");
        Url::parse_with_params(
            &self.config.news_feed_url,
            &[
                ("q", q.as_str()),
                ("hl", "en-IN"),
                ("gl", "IN"),
                ("ceid", "IN:en"),
            ],
        )
        .map_err(|e| SearchError::Config(format!("invalid news_feed_url: {e}")))
    }

    /// Fetch the feed items for `query`, in feed order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] when the feed cannot be fetched and
    /// [`SearchError::Parse`] when it is not well-formed XML.
    pub async fn fetch_items(&self, query: &str) -> Result<Vec<NewsItem>, SearchError> {
        tracing::trace!(query, "news feed search");
        let url = self.feed_url(query)?;
        let xml = http::fetch_text(&self.client, url, &self.config, "news feed").await?;
        parse_feed_xml(&xml, self.config.max_news_items)
    }
}

#[async_trait]
impl AnnouncementSource for NewsFeedSource {
    async fn announce(&self, query: &str) -> Result<Option<AnnouncementFact>, SearchError> {
        let items = self.fetch_items(query).await?;
        Ok(first_announcement(&items, self.kind()))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Primary
    }
}

/// The first item, in order, that names a known platform.
///
/// The date is taken from that same item only.
pub fn first_announcement(items: &[NewsItem], kind: SourceKind) -> Option<AnnouncementFact> {
    items.iter().find_map(|item| {
        let extraction = extract::extract_announcement(&item.text());
        extraction
            .platform
            .map(|platform| AnnouncementFact::new(Some(platform), extraction.release_date, Some(kind)))
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
}

/// Parse RSS `<item>` entries into [`NewsItem`]s.
///
/// Descriptions are HTML fragments in most feeds; their visible text is kept.
pub(crate) fn parse_feed_xml(xml: &str, max_items: usize) -> Result<Vec<NewsItem>, SearchError> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<NewsItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"item" => {
                    current = Some(NewsItem {
                        title: String::new(),
                        description: String::new(),
                    });
                }
                b"title" if current.is_some() => field = Some(Field::Title),
                b"description" if current.is_some() => field = Some(Field::Description),
                _ => {}
            },
            Ok(Event::Text(te)) => {
                let text = te
                    .unescape()
                    .map(|t| t.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&te).into_owned());
                push_field(current.as_mut(), field, &text);
            }
            Ok(Event::CData(cd)) => {
                let text = String::from_utf8_lossy(&cd).into_owned();
                push_field(current.as_mut(), field, &text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"item" => {
                    if let Some(mut item) = current.take() {
                        item.title = extract::collapse_whitespace(&item.title);
                        item.description = extract::visible_text(&item.description);
                        items.push(item);
                        if items.len() >= max_items {
                            break;
                        }
                    }
                    field = None;
                }
                b"title" | b"description" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SearchError::Parse(format!(
                    "news feed XML error at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    tracing::debug!(count = items.len(), "news feed items parsed");
    Ok(items)
}

fn push_field(item: Option<&mut NewsItem>, field: Option<Field>, text: &str) {
    let Some(item) = item else {
        return;
    };
    let target = match field {
        Some(Field::Title) => &mut item.title,
        Some(Field::Description) => &mut item.description,
        None => return,
    };
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>"Kantara" OTT release - Google News</title>
  <item>
    <title>Kantara Chapter 1 box office crosses 500 crore</title>
    <link>https://news.example/1</link>
    <description>&lt;a href="https://news.example/1"&gt;Theatrical run continues&lt;/a&gt;</description>
  </item>
  <item>
    <title>Kantara Chapter 1 OTT release: Prime Video date confirmed</title>
    <link>https://news.example/2</link>
    <description><![CDATA[<p>Streaming from <b>31 October 2025</b> in five languages</p>]]></description>
  </item>
  <item>
    <title>Kantara lands on Netflix?</title>
    <description>Rumours say 1 Nov 2025</description>
  </item>
</channel>
</rss>"#;

    #[test]
    fn parse_feed_reads_items_in_order() {
        let items = parse_feed_xml(MOCK_FEED_XML, 10).expect("should parse");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Kantara Chapter 1 box office crosses 500 crore");
        assert_eq!(items[0].description, "Theatrical run continues");
        assert_eq!(
            items[1].description,
            "Streaming from 31 October 2025 in five languages"
        );
    }

    #[test]
    fn channel_title_is_not_an_item() {
        let items = parse_feed_xml(MOCK_FEED_XML, 10).expect("should parse");
        assert!(items.iter().all(|i| !i.title.contains("Google News")));
    }

    #[test]
    fn parse_respects_max_items() {
        let items = parse_feed_xml(MOCK_FEED_XML, 2).expect("should parse");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn parse_plain_text_returns_empty() {
        let items = parse_feed_xml("service temporarily unavailable", 10).expect("should parse");
        assert!(items.is_empty());
    }

    #[test]
    fn parse_mismatched_tags_is_error() {
        let result = parse_feed_xml("<rss><item><title>x</description></item></rss>", 10);
        assert!(matches!(result, Err(SearchError::Parse(_))));
    }

    #[test]
    fn first_platform_item_wins() {
        let items = parse_feed_xml(MOCK_FEED_XML, 10).expect("should parse");
        let fact = first_announcement(&items, SourceKind::Primary).expect("announcement");
        assert_eq!(fact.platform.as_deref(), Some("Prime Video"));
        assert_eq!(fact.release_date.as_deref(), Some("31 October 2025"));
        assert_eq!(fact.source, Some(SourceKind::Primary));
    }

    #[test]
    fn date_is_not_borrowed_from_other_items() {
        let items = vec![
            NewsItem {
                title: "Release on 4 July 2025".into(),
                description: String::new(),
            },
            NewsItem {
                title: "Heading to SonyLIV".into(),
                description: String::new(),
            },
        ];
        let fact = first_announcement(&items, SourceKind::Primary).expect("announcement");
        assert_eq!(fact.platform.as_deref(), Some("SonyLIV"));
        assert!(fact.release_date.is_none());
    }

    #[test]
    fn no_platform_means_no_announcement() {
        let items = vec![NewsItem {
            title: "Box office update".into(),
            description: "in cinemas 3 May 2025".into(),
        }];
        assert!(first_announcement(&items, SourceKind::Primary).is_none());
        assert!(first_announcement(&[], SourceKind::Primary).is_none());
    }

    #[test]
    fn feed_url_appends_ott_release() {
        let source = NewsFeedSource::new(&SearchConfig::default()).expect("client");
        let url = source.feed_url("Kantara").expect("url");
        let q = url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned());
        assert_eq!(q.as_deref(), Some("Kantara OTT release"));
    }

    #[tokio::test]
    #[ignore] // Live test: run with `cargo test -- --ignored`
    async fn live_news_feed() {
        let source = NewsFeedSource::new(&SearchConfig::default()).expect("client");
        let items = source.fetch_items("Kantara").await;
        assert!(items.is_ok());
    }
}
