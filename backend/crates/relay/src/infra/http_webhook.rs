//! HTTP Webhook Gateway

use reqwest::Client;

use crate::domain::entities::WebhookPayload;
use crate::domain::gateway::WebhookGateway;
use crate::domain::value_objects::Destination;
use crate::error::RelayError;

/// reqwest-backed webhook gateway
#[derive(Debug, Clone)]
pub struct HttpWebhookGateway {
    client: Client,
}

impl HttpWebhookGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl WebhookGateway for HttpWebhookGateway {
    async fn post(
        &self,
        destination: &Destination,
        payload: &WebhookPayload,
    ) -> Result<(), RelayError> {
        let response = self
            .client
            .post(destination.as_url().clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| RelayError::DeliveryFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::DeliveryFailed(format!(
                "destination returned HTTP {status}"
            )));
        }
        Ok(())
    }
}
