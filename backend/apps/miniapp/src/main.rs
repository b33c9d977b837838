//! Mini-app Client Entry Point
//!
//! Runs one verification attempt for the session described by the
//! environment, relays the outcome to the bot destination, and exits once
//! the host session is closed. Stats are polled in the background.

mod host;
mod surface;

use std::process::ExitCode;
use std::sync::Arc;

use platform::http::{HttpClientConfig, build_client};
use platform::query::{Url, parse_http_url};
use relay::application::StatsFetcher;
use relay::application::config::STATS_PATH;
use relay::application::orchestrator::OrchestratorPorts;
use relay::domain::host::HostRuntime;
use relay::infra::{DeviceFingerprinter, HttpStatsSource, HttpVerifierGateway, HttpWebhookGateway};
use relay::{AttemptOutcome, RelayConfig, VerificationOrchestrator};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::host::EnvHost;
use crate::surface::TracingSurface;

const DEFAULT_PAGE: &str = "http://localhost:3000/";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for the completion payload
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "miniapp=info,relay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Relay configuration
    let base = if cfg!(debug_assertions) {
        RelayConfig::development()
    } else {
        RelayConfig::default()
    };
    let config = Arc::new(RelayConfig::from_env_with(base)?);

    let client = build_client(&HttpClientConfig::default())?;

    let (host, mut closed) = EnvHost::from_env();
    let host = Arc::new(host);
    host.expand();

    let fingerprints = Arc::new(DeviceFingerprinter::default());
    tokio::spawn({
        let fingerprints = fingerprints.clone();
        async move { fingerprints.warm().await }
    });

    let surface = Arc::new(TracingSurface);

    let stats = Arc::new(StatsFetcher::new(
        Arc::new(HttpStatsSource::new(
            client.clone(),
            stats_endpoint(host.page_url())?,
        )),
        surface.clone(),
    ));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = tokio::spawn({
        let stats = stats.clone();
        let interval = config.stats_interval;
        async move { stats.run(interval, shutdown_rx).await }
    });

    let orchestrator = VerificationOrchestrator::new(
        OrchestratorPorts {
            verifier: Arc::new(HttpVerifierGateway::new(
                client.clone(),
                config.verification_endpoint()?,
                config.api_key.clone(),
            )),
            webhook: Arc::new(HttpWebhookGateway::new(client)),
            fingerprints,
            stats,
            host,
            surface,
        },
        config,
    );

    let code = match orchestrator.handle_verification().await {
        AttemptOutcome::Succeeded(_) => {
            if closed.wait_for(|closed| *closed).await.is_err() {
                tracing::warn!("Host dropped before close");
            }
            ExitCode::SUCCESS
        }
        AttemptOutcome::Failed(_) | AttemptOutcome::Ignored => ExitCode::FAILURE,
    };

    shutdown_tx.send_replace(true);
    if let Err(e) = poller.await {
        tracing::warn!(error = %e, "Stats poller task failed");
    }

    Ok(code)
}

/// `/api/stats` on the mini-app origin, or on the local server when no page is known
fn stats_endpoint(page: Option<Url>) -> anyhow::Result<Url> {
    let page = match page {
        Some(page) => page,
        None => parse_http_url(DEFAULT_PAGE)
            .ok_or_else(|| anyhow::anyhow!("invalid default page {DEFAULT_PAGE}"))?,
    };
    Ok(page.join(STATS_PATH)?)
}
