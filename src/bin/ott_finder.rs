//! ott-finder service binary.
//!
//! Reads `$OTT_FINDER_CONFIG` or `~/.config/ott-finder/config.toml` and
//! serves the HTTP API until ctrl-c. Logs go to stderr; set `RUST_LOG` to
//! adjust verbosity.

use ott_finder::ServiceConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::load()?;
    tracing::info!(
        bind = %config.server.bind_addr(),
        threshold = config.search.similarity_threshold,
        cache_ttl_seconds = config.search.cache_ttl_seconds,
        "starting ott-finder"
    );

    ott_finder::run(config).await
}
