//! Text heuristics shared by every source.
//!
//! All functions here accept arbitrary text and never fail: garbage in
//! yields `None`, not an error.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Node};

/// Streaming platforms recognised in announcement text.
///
/// Order matters: the first entry found wins, so longer names are listed
/// before the shorter names they contain ("Amazon Prime Video" before
/// "Prime Video", "Disney+ Hotstar" before "Hotstar").
pub const KNOWN_PLATFORMS: &[&str] = &[
    "Netflix",
    "Amazon Prime Video",
    "Prime Video",
    "JioHotstar",
    "Disney+ Hotstar",
    "Hotstar",
    "JioCinema",
    "SonyLIV",
    "ZEE5",
    "Sun NXT",
    "Aha Video",
    "ManoramaMAX",
    "Lionsgate Play",
    "MX Player",
    "Apple TV+",
    "HBO Max",
    "Hulu",
    "Peacock",
    "Paramount+",
];

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern compiles"));

// Listing cards show dates as "Mar 2024" or "Dec 12, 2023".
static CARD_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec).*?\d{4}\b")
        .expect("card date pattern compiles")
});

// News prose: "12 March 2024", "5 Sept 2025".
static ANNOUNCED_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4}\b")
        .expect("announced date pattern compiles")
});

/// Platform and date pulled out of a single piece of announcement text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub platform: Option<String>,
    pub release_date: Option<String>,
}

/// First 19xx/20xx year in `text`.
pub fn find_year(text: &str) -> Option<String> {
    YEAR_RE.find(text).map(|m| m.as_str().to_owned())
}

/// First "Mon ... YYYY" run in listing card text.
pub fn find_card_release_date(text: &str) -> Option<String> {
    CARD_DATE_RE.find(text).map(|m| m.as_str().to_owned())
}

/// First known platform mentioned anywhere in `text`, case-insensitively.
pub fn find_platform(text: &str) -> Option<&'static str> {
    let haystack = text.to_lowercase();
    KNOWN_PLATFORMS
        .iter()
        .find(|platform| haystack.contains(&platform.to_lowercase()))
        .copied()
}

/// First "day month-name year" date in `text`.
pub fn find_announced_date(text: &str) -> Option<String> {
    ANNOUNCED_DATE_RE.find(text).map(|m| m.as_str().to_owned())
}

/// Extract platform and release date independently from `text`.
pub fn extract_announcement(text: &str) -> Extraction {
    Extraction {
        platform: find_platform(text).map(str::to_owned),
        release_date: find_announced_date(text),
    }
}

/// Collapse all whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Readable text of an HTML document or fragment.
///
/// Script, style and title contents are skipped.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript" | "title"));
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}
