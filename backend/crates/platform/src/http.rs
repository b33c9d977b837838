//! Outbound HTTP client
//!
//! A single `reqwest::Client` is shared by every gateway so that
//! connections to the verifier, the stats endpoint and webhook
//! destinations are pooled.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Outbound HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Idle pooled connections are dropped after this long
    pub pool_idle_timeout: Duration,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            pool_idle_timeout: Duration::from_secs(30),
            user_agent: format!("miniapp-relay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Error when building the HTTP client
#[derive(Debug, thiserror::Error)]
#[error("Failed to build HTTP client: {0}")]
pub struct HttpClientError(#[from] reqwest::Error);

/// Build the shared HTTP client
///
/// No total request timeout is set here. Callers that need a hard
/// deadline enforce it themselves; everything else relies on the
/// transport defaults.
pub fn build_client(config: &HttpClientConfig) -> Result<Client, HttpClientError> {
    let client = ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .tcp_nodelay(true)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
