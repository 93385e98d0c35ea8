//! prewarm - headless host for the prefetch policy.
//!
//! Wires a `Prefetcher` to the HTTP cache client the way an application
//! would during initialization: warms the common resources once, then
//! replays each route given on the command line as a hover arm followed by
//! a navigation.
//!
//! Environment:
//! - `PREWARM_API_BASE`: base URL resources are fetched from
//! - `PREWARM_LOG_DIR`: also write daily-rotated logs to this directory
//! - `RUST_LOG`: log filter (default `warn`)

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use prewarm_core::{DocumentCapability, HttpCacheClient, NoDocument, PrefetchConfig, Prefetcher};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ============================================================================
// Constants
// ============================================================================

/// Fallback API base when `PREWARM_API_BASE` is unset
const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// How long to wait for in-flight warms before exiting.
/// Slightly above the client's request timeout so every fetch can settle.
const DRAIN_TIMEOUT_SECS: u64 = 15;

/// Initialize the tracing subscriber for logging.
/// The returned guard must stay alive for the file writer to flush.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var("PREWARM_LOG_DIR") {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "prewarm.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();
    info!("prewarm starting");

    let config = PrefetchConfig::load().context("Failed to load prefetch config")?;
    let api_base =
        std::env::var("PREWARM_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let cache = HttpCacheClient::new(&api_base).context("Failed to build HTTP client")?;

    // No interactive document in a terminal host
    let prefetcher = Prefetcher::<NoDocument>::new(
        &config,
        Arc::new(cache.clone()),
        DocumentCapability::Headless,
    )
    .context("Invalid prefetch config")?;

    prefetcher.on_startup();

    for route in std::env::args().skip(1) {
        prefetcher.arm_hover(&route);
        prefetcher.on_navigate(&route);
    }

    if !cache.wait_idle(Duration::from_secs(DRAIN_TIMEOUT_SECS)).await {
        warn!(in_flight = cache.in_flight(), "Timed out waiting for warm requests");
    }

    for (key, age) in cache.cache_ages() {
        println!("{:<16} {}", key, age);
    }

    info!("prewarm shutting down");
    Ok(())
}
