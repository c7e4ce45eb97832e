//! Integration tests for the title search pipeline.
//!
//! These tests exercise the full validate → cache → acquire → score →
//! filter → sort → paginate path using in-process fake sources (no network
//! calls).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ott_search::{
    CandidateRecord, CandidateSource, DetectedYear, ResultCache, SearchConfig, SearchError,
    SearchPipeline, SearchRequest,
};

const YEAR: i32 = 2026;

enum Mode {
    Records(Vec<CandidateRecord>),
    Fails,
    Misconfigured,
    Hangs,
}

struct FakeSource {
    mode: Mode,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(mode: Mode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateSource for FakeSource {
    async fn fetch_candidates(&self, _query: &str) -> Result<Vec<CandidateRecord>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            Mode::Records(records) => Ok(records.clone()),
            Mode::Fails => Err(SearchError::Http("listing page blocked".into())),
            Mode::Misconfigured => Err(SearchError::Config("invalid listing_url".into())),
            Mode::Hangs => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(Vec::new())
            }
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn config() -> SearchConfig {
    SearchConfig {
        timeout_seconds: 1,
        request_delay_ms: (0, 0),
        ..Default::default()
    }
}

fn pipeline(source: Arc<FakeSource>) -> SearchPipeline {
    let config = config();
    SearchPipeline::new(source, ResultCache::from_config(&config), config)
}

fn record(title: &str, year: &str) -> CandidateRecord {
    CandidateRecord::titled(title, Some(year))
}

#[tokio::test]
async fn interstellar_auto_year_keeps_only_recent_release() {
    let source = FakeSource::new(Mode::Records(vec![
        record("Interstellar", "2014"),
        record("Interstellar 2", "2026"),
    ]));
    let response = pipeline(source)
        .resolve_at(&SearchRequest::new("Interstellar"), YEAR)
        .await
        .expect("resolve");

    assert!(response.success);
    assert_eq!(response.detected_year, DetectedYear::Auto([2026, 2025]));
    assert_eq!(response.total_results, 1);
    assert_eq!(response.results[0].record.title, "Interstellar 2");
}

#[tokio::test]
async fn explicit_year_keeps_only_that_year() {
    let source = FakeSource::new(Mode::Records(vec![
        record("Interstellar", "2014"),
        record("Interstellar 2", "2026"),
        record("Interstellar", "2015"),
    ]));
    let response = pipeline(source)
        .resolve_at(&SearchRequest::new("Interstellar").with_year("2014"), YEAR)
        .await
        .expect("resolve");

    assert_eq!(response.detected_year, DetectedYear::Explicit("2014".into()));
    assert_eq!(response.total_results, 1);
    assert!(response
        .results
        .iter()
        .all(|r| r.record.year.as_deref() == Some("2014")));
}

#[tokio::test]
async fn results_sorted_and_paginated() {
    let mut records = Vec::new();
    for i in 0..12 {
        records.push(record(&format!("Pushpa {i}"), "2026"));
        records.push(record("Pushpa", "2025"));
    }
    let pipeline = pipeline(FakeSource::new(Mode::Records(records)));

    let first = pipeline
        .resolve_at(&SearchRequest::new("pushpa"), YEAR)
        .await
        .expect("page 1");
    assert_eq!(first.total_results, 24);
    assert_eq!(first.results.len(), 10);
    assert!(first.results.iter().all(|r| r.record.title == "Pushpa"));
    for pair in first.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    let third = pipeline
        .resolve_at(&SearchRequest::new("pushpa").with_page(3), YEAR)
        .await
        .expect("page 3");
    assert_eq!(third.results.len(), 4);
    // Equal scores keep upstream order.
    let titles: Vec<&str> = third.results.iter().map(|r| r.record.title.as_str()).collect();
    assert_eq!(titles, vec!["Pushpa 8", "Pushpa 9", "Pushpa 10", "Pushpa 11"]);
}

#[tokio::test]
async fn page_beyond_data_is_empty_with_total() {
    let source = FakeSource::new(Mode::Records(vec![record("Dune", "2026")]));
    let response = pipeline(source)
        .resolve_at(&SearchRequest::new("dune").with_page(5), YEAR)
        .await
        .expect("resolve");

    assert!(response.success);
    assert_eq!(response.page, 5);
    assert_eq!(response.total_results, 1);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn empty_query_rejected_without_source_call() {
    let source = FakeSource::new(Mode::Records(vec![record("Dune", "2026")]));
    let pipeline = pipeline(source.clone());

    let err = pipeline
        .resolve_at(&SearchRequest::new("  "), YEAR)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Validation(_)));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn second_identical_query_served_from_cache() {
    let source = FakeSource::new(Mode::Records(vec![record("Dune", "2026")]));
    let pipeline = pipeline(source.clone());

    let first = pipeline
        .resolve_at(&SearchRequest::new("Dune"), YEAR)
        .await
        .expect("first");
    let second = pipeline
        .resolve_at(&SearchRequest::new("  dune "), YEAR)
        .await
        .expect("second");

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(second.results, first.results);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn cache_hit_echoes_callers_query_spelling() {
    let source = FakeSource::new(Mode::Records(vec![record("Dune", "2026")]));
    let pipeline = pipeline(source.clone());

    let first = pipeline
        .resolve_at(&SearchRequest::new("DUNE"), YEAR)
        .await
        .expect("first");
    let second = pipeline
        .resolve_at(&SearchRequest::new("dune"), YEAR)
        .await
        .expect("second");

    assert_eq!(first.query, "DUNE");
    assert!(second.cached);
    assert_eq!(second.query, "dune");
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn different_page_is_a_different_cache_entry() {
    let source = FakeSource::new(Mode::Records(vec![record("Dune", "2026")]));
    let pipeline = pipeline(source.clone());

    pipeline
        .resolve_at(&SearchRequest::new("Dune"), YEAR)
        .await
        .expect("page 1");
    pipeline
        .resolve_at(&SearchRequest::new("Dune").with_page(2), YEAR)
        .await
        .expect("page 2");

    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn acquisition_failure_degrades_and_is_not_cached() {
    let source = FakeSource::new(Mode::Fails);
    let pipeline = pipeline(source.clone());

    let response = pipeline
        .resolve_at(&SearchRequest::new("Dune"), YEAR)
        .await
        .expect("degraded, not an error");
    assert!(!response.success);
    assert!(response.results.is_empty());
    assert_eq!(response.total_results, 0);

    let again = pipeline
        .resolve_at(&SearchRequest::new("Dune"), YEAR)
        .await
        .expect("degraded again");
    assert!(!again.cached);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn non_acquisition_error_is_returned_not_degraded() {
    let source = FakeSource::new(Mode::Misconfigured);
    let pipeline = pipeline(source.clone());

    let err = pipeline
        .resolve_at(&SearchRequest::new("Dune"), YEAR)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Config(_)));
    assert!(!err.is_acquisition_failure());
}

#[tokio::test]
async fn hanging_source_times_out_and_degrades() {
    let source = FakeSource::new(Mode::Hangs);
    let started = std::time::Instant::now();

    let response = pipeline(source)
        .resolve_at(&SearchRequest::new("Dune"), YEAR)
        .await
        .expect("degraded");

    assert!(!response.success);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn lower_threshold_admits_weaker_matches() {
    // "kantara" vs "kantara chapter": 8 insertions over 15 chars ≈ 0.467.
    let records = vec![record("Kantara Chapter", "2026")];

    let strict = pipeline(FakeSource::new(Mode::Records(records.clone())))
        .resolve_at(&SearchRequest::new("kantara"), YEAR)
        .await
        .expect("strict");
    assert_eq!(strict.total_results, 0);

    let config = SearchConfig {
        similarity_threshold: 0.45,
        ..config()
    };
    let lenient = SearchPipeline::new(
        FakeSource::new(Mode::Records(records)),
        ResultCache::from_config(&config),
        config,
    )
    .resolve_at(&SearchRequest::new("kantara"), YEAR)
    .await
    .expect("lenient");
    assert_eq!(lenient.total_results, 1);
}

#[tokio::test]
async fn unstructured_records_never_fail() {
    let source = FakeSource::new(Mode::Records(vec![
        CandidateRecord::titled("", None),
        CandidateRecord::titled("\u{fffd}\u{0}", Some("not a year")),
        record("Dune", "20266"),
    ]));
    let response = pipeline(source)
        .resolve_at(&SearchRequest::new("Dune"), YEAR)
        .await
        .expect("resolve");

    assert!(response.success);
    assert_eq!(response.total_results, 0);
}
