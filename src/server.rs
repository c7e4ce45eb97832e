//! HTTP API over the title search pipeline and announcement resolver.
//!
//! ## Endpoints
//!
//! - `GET /search?q=&year=&page=`: ranked, year-filtered, paginated titles
//! - `GET /ott-release?q=`: best-guess OTT platform and release date
//! - `GET /health`: liveness and version

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ott_search::{
    AnnouncementFact, AnnouncementResolver, AnnouncementStatus, SearchConfig, SearchPipeline,
    SearchRequest, SearchResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::error::{ApiError, Result};

/// Shared handles for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SearchPipeline>,
    pub resolver: Arc<AnnouncementResolver>,
}

impl AppState {
    pub fn new(pipeline: SearchPipeline, resolver: AnnouncementResolver) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            resolver: Arc::new(resolver),
        }
    }

    /// Wire the HTTP-backed sources and one process-wide result cache.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or an HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let (pipeline, resolver) = ott_search::build(config)?;
        Ok(Self::new(pipeline, resolver))
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    year: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseParams {
    q: Option<String>,
}

/// Body of `GET /ott-release`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResponse {
    pub success: bool,
    pub query: String,
    pub ott: AnnouncementFact,
    pub note: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/ott-release", get(ott_release))
        .with_state(state)
}

/// Bind, then serve until ctrl-c.
///
/// # Errors
///
/// Returns an error if the backend cannot be built or the listener fails.
pub async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config.search)?;
    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("ott-finder listening on http://{local_addr}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> std::result::Result<Json<SearchResponse>, ApiError> {
    let request = SearchRequest {
        query: required_query(params.q)?,
        year: params.year.filter(|y| !y.trim().is_empty()),
        page: parse_page(params.page.as_deref())?,
    };
    let response = state.pipeline.resolve(&request).await?;
    Ok(Json(response))
}

async fn ott_release(
    State(state): State<AppState>,
    Query(params): Query<ReleaseParams>,
) -> std::result::Result<Json<ReleaseResponse>, ApiError> {
    let query = required_query(params.q)?;
    let report = state.resolver.resolve(&query).await?;
    Ok(Json(ReleaseResponse {
        success: report.responded,
        note: release_note(&report.fact, report.responded).to_owned(),
        query,
        ott: report.fact,
    }))
}

fn required_query(q: Option<String>) -> std::result::Result<String, ApiError> {
    match q.map(|q| q.trim().to_owned()) {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(ApiError::BadRequest(
            "Query parameter 'q' is required".into(),
        )),
    }
}

fn parse_page(page: Option<&str>) -> std::result::Result<usize, ApiError> {
    let Some(raw) = page.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(1);
    };
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ApiError::BadRequest(
            "Query parameter 'page' must be a positive integer".into(),
        )),
    }
}

fn release_note(fact: &AnnouncementFact, responded: bool) -> &'static str {
    if !responded {
        return "News sources are unreachable right now; try again later.";
    }
    match fact.status {
        AnnouncementStatus::DateAnnounced => {
            "Platform and date taken from news coverage; confirm with the platform."
        }
        AnnouncementStatus::PlatformOnlyAnnounced => {
            "Platform reported in news coverage; no release date announced yet."
        }
        AnnouncementStatus::NoAnnouncement => "No OTT release has been announced yet.",
    }
}
