//! Environment-backed host runtime
//!
//! Headless stand-in for the mini-app container: the session comes from
//! environment variables, the completion payload is written to stdout as
//! one JSON line, and `close` flips a watch channel the entry point waits on.

use std::env;

use platform::query::{Url, parse_http_url};
use relay::domain::host::{HostRuntime, HostSession};
use relay::error::HostError;
use tokio::io::AsyncWriteExt;
use tokio::sync::watch;

pub struct EnvHost {
    session: HostSession,
    page: Option<Url>,
    closed: watch::Sender<bool>,
}

impl EnvHost {
    /// Read `TELEGRAM_USER_ID`, `TELEGRAM_INIT_DATA`, `TELEGRAM_USERNAME`
    /// and `MINIAPP_URL`
    ///
    /// Missing or unparseable values are left absent; the orchestrator
    /// reports them to the user.
    pub fn from_env() -> (Self, watch::Receiver<bool>) {
        let user_id = env::var("TELEGRAM_USER_ID")
            .ok()
            .and_then(|raw| raw.trim().parse().ok());
        let session = HostSession {
            user_id,
            init_data: env::var("TELEGRAM_INIT_DATA").unwrap_or_default(),
            username: env::var("TELEGRAM_USERNAME").ok(),
        };
        let page = env::var("MINIAPP_URL")
            .ok()
            .and_then(|raw| parse_http_url(&raw));

        Self::new(session, page)
    }

    pub fn new(session: HostSession, page: Option<Url>) -> (Self, watch::Receiver<bool>) {
        let (closed, rx) = watch::channel(false);
        (
            Self {
                session,
                page,
                closed,
            },
            rx,
        )
    }
}

impl HostRuntime for EnvHost {
    fn session(&self) -> HostSession {
        self.session.clone()
    }

    fn page_url(&self) -> Option<Url> {
        self.page.clone()
    }

    fn expand(&self) {
        tracing::debug!("Viewport expand requested");
    }

    async fn send_data(&self, data: String) -> Result<(), HostError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("{data}\n").as_bytes())
            .await
            .map_err(|e| HostError::Unavailable(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| HostError::Unavailable(e.to_string()))
    }

    async fn close(&self) -> Result<(), HostError> {
        self.closed.send_replace(true);
        tracing::info!("Host session closed");
        Ok(())
    }
}
