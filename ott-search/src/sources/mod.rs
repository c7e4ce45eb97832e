//! Concrete HTTP-backed sources.
//!
//! Each module provides a struct implementing [`crate::source::CandidateSource`]
//! or [`crate::source::AnnouncementSource`] for one upstream site.

pub mod news_feed;
pub mod ottplay;
pub mod site_search;

pub use news_feed::NewsFeedSource;
pub use ottplay::OttPlaySource;
pub use site_search::SiteSearchSource;
