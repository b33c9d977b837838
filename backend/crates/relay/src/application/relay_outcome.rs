//! Relay Outcome Use Case
//!
//! Delivers a verified outcome to the bot destination with a single POST,
//! then hands the same payload to the host and schedules host close.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::entities::WebhookPayload;
use crate::domain::gateway::WebhookGateway;
use crate::domain::host::HostRuntime;
use crate::domain::value_objects::Destination;
use crate::error::{HostError, RelayError};

/// Result of signalling completion to the host
#[derive(Debug)]
pub struct Completion {
    /// Whether the host accepted the payload
    pub signalled: bool,
    /// Delayed host close; errors inside are logged only
    pub close_task: JoinHandle<()>,
}

/// Webhook relay
pub struct WebhookRelay<W, H>
where
    W: WebhookGateway,
    H: HostRuntime + Send + Sync + 'static,
{
    gateway: Arc<W>,
    host: Arc<H>,
    close_grace: Duration,
}

impl<W, H> WebhookRelay<W, H>
where
    W: WebhookGateway,
    H: HostRuntime + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<W>, host: Arc<H>, close_grace: Duration) -> Self {
        Self {
            gateway,
            host,
            close_grace,
        }
    }

    /// POST the payload to the destination exactly once
    ///
    /// A missing destination fails before any network call.
    pub async fn deliver(
        &self,
        payload: &WebhookPayload,
        destination: Option<&Destination>,
    ) -> Result<(), RelayError> {
        let destination = destination.ok_or(RelayError::MissingDestination)?;

        self.gateway.post(destination, payload).await?;

        tracing::info!(
            telegram_id = %payload.telegram_id,
            destination = %destination,
            "Verification outcome delivered"
        );
        Ok(())
    }

    /// Hand the payload to the host, then close the host after the grace delay
    ///
    /// Close is scheduled even when the host refuses the payload: delivery
    /// to the bot has already happened at this point.
    pub async fn signal_completion(&self, payload: &WebhookPayload) -> Completion {
        let signalled = match self.send_to_host(payload).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    telegram_id = %payload.telegram_id,
                    "Completion signal failed after delivery"
                );
                false
            }
        };

        let host = self.host.clone();
        let grace = self.close_grace;
        let close_task = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            if let Err(e) = host.close().await {
                tracing::warn!(error = %e, "Failed to close host session");
            }
        });

        Completion {
            signalled,
            close_task,
        }
    }

    async fn send_to_host(&self, payload: &WebhookPayload) -> Result<(), HostError> {
        let data = serde_json::to_string(payload).map_err(|e| HostError::Rejected(e.to_string()))?;
        self.host.send_data(data).await
    }
}
