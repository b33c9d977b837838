//! HTTP Verifier Gateway

use platform::query::Url;
use reqwest::Client;

use crate::domain::entities::{VerificationRequest, VerificationResult};
use crate::domain::gateway::VerifierGateway;
use crate::domain::value_objects::ApiKey;
use crate::error::VerificationError;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// reqwest-backed verifier gateway
#[derive(Debug, Clone)]
pub struct HttpVerifierGateway {
    client: Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl HttpVerifierGateway {
    pub fn new(client: Client, endpoint: Url, api_key: ApiKey) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

impl VerifierGateway for HttpVerifierGateway {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, VerificationError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.expose())
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(|e| {
                // The URL holds the init-data token; strip it before logging.
                // Client-level timeouts are transport failures; only the
                // verification deadline reports `Timeout`.
                let e = e.without_url();
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Verifier request failed");
                VerificationError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Verifier returned non-success status");
            return Err(VerificationError::ApiError(status.as_u16()));
        }

        response
            .json::<VerificationResult>()
            .await
            .map_err(|e| VerificationError::Malformed(e.without_url().to_string()))
    }
}
