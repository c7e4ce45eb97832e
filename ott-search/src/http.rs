//! Shared HTTP plumbing for upstream sources.
//!
//! Every source goes through [`fetch_text`]: jittered delay, rotated
//! browser User-Agent, Indian English locale, status check.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::Rng;
use std::time::Duration;

/// Desktop and mobile browser identities; listing and news pages serve
/// stripped markup to unknown clients.
const BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Linux; Android 14; SM-S921B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0.6613.127 Mobile Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36 Edg/128.0.0.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:130.0) Gecko/20100101 Firefox/130.0",
];

/// Client shared by every request a source makes.
///
/// Redirects are followed (news links bounce through trackers), cookies are
/// kept between requests, and the whole request including the body is
/// bounded by `timeout_seconds`.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if TLS or the cookie store cannot be set up.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let limit = Duration::from_secs(config.timeout_seconds);
    reqwest::Client::builder()
        .timeout(limit)
        .connect_timeout(limit.min(Duration::from_secs(10)))
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("client setup: {e}")))
}

/// User-Agent for the next request: the configured one, or a random pick.
pub fn user_agent(config: &SearchConfig) -> &str {
    match config.user_agent.as_deref() {
        Some(custom) => custom,
        None => random_user_agent(),
    }
}

pub fn random_user_agent() -> &'static str {
    let index = rand::thread_rng().gen_range(0..BROWSER_AGENTS.len());
    BROWSER_AGENTS[index]
}

/// Sleep for a random duration within `config.request_delay_ms`.
pub async fn request_delay(config: &SearchConfig) {
    let (min, max) = config.request_delay_ms;
    if max == 0 {
        return;
    }
    let millis = rand::thread_rng().gen_range(min..=max);
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// GET `url` and return the body as text, mapping every failure to
/// [`SearchError::Http`].
pub async fn fetch_text(
    client: &reqwest::Client,
    url: url::Url,
    config: &SearchConfig,
    source: &str,
) -> Result<String, SearchError> {
    request_delay(config).await;

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, user_agent(config))
        .header(reqwest::header::ACCEPT_LANGUAGE, "en-IN,en;q=0.9")
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("{source} request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("{source} HTTP error: {e}")))?;

    let body = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("{source} response read failed: {e}")))?;

    tracing::trace!(source, bytes = body.len(), "response received");
    Ok(body)
}
