//! Gateway Traits
//!
//! Outbound collaborators of the relay. Implementations are in the infra layer.

use crate::domain::entities::{StatsSnapshot, VerificationRequest, VerificationResult, WebhookPayload};
use crate::domain::value_objects::{DeviceFingerprint, Destination};
use crate::error::{RelayError, StatsFetchError, VerificationError};

/// Remote verification service
#[trait_variant::make(VerifierGateway: Send)]
pub trait LocalVerifierGateway {
    /// Issue exactly one verification call
    ///
    /// Non-2xx maps to `ApiError`. No deadline is applied here; dropping
    /// the returned future aborts the call.
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, VerificationError>;
}

/// Bot webhook destination
#[trait_variant::make(WebhookGateway: Send)]
pub trait LocalWebhookGateway {
    /// POST the payload once as JSON; never retried
    async fn post(
        &self,
        destination: &Destination,
        payload: &WebhookPayload,
    ) -> Result<(), RelayError>;
}

/// Aggregate counters endpoint
#[trait_variant::make(StatsSource: Send)]
pub trait LocalStatsSource {
    async fn fetch(&self) -> Result<StatsSnapshot, StatsFetchError>;
}

/// Best-effort device fingerprinting capability
///
/// Any internal failure yields `None`; absence is a normal value.
#[trait_variant::make(FingerprintSource: Send)]
pub trait LocalFingerprintSource {
    async fn acquire(&self) -> Option<DeviceFingerprint>;
}
