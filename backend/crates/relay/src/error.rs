//! Relay Error Types
//!
//! Verification, delivery and stats errors. Each maps onto a
//! `kernel::error::ErrorKind` and converts into `AppError`, and each
//! attempt-level failure has exactly one user-visible status message.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Fallback reason when the verifier rejects without saying why
pub const DEFAULT_REJECTION_REASON: &str = "Verification failed";

/// Errors from the remote verification call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The deadline fired before the verifier answered
    #[error("Verification timed out")]
    Timeout,

    /// The verifier answered with a non-2xx status
    #[error("Verifier returned HTTP {0}")]
    ApiError(u16),

    /// The verifier answered `success: false`
    #[error("Verification rejected: {0}")]
    Rejected(String),

    /// The request never produced a response (DNS, connect, reset)
    #[error("Verifier unreachable: {0}")]
    Transport(String),

    /// The verifier answered 2xx with a body that is not a verification result
    #[error("Malformed verifier response: {0}")]
    Malformed(String),
}

impl VerificationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerificationError::Timeout => ErrorKind::GatewayTimeout,
            VerificationError::ApiError(_) | VerificationError::Malformed(_) => {
                ErrorKind::BadGateway
            }
            VerificationError::Rejected(_) => ErrorKind::Forbidden,
            VerificationError::Transport(_) => ErrorKind::ServiceUnavailable,
        }
    }
}

/// Errors from relaying the outcome to the bot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The page carried no usable destination parameter
    #[error("Webhook destination missing")]
    MissingDestination,

    /// The single POST to the destination failed
    #[error("Webhook delivery failed: {0}")]
    DeliveryFailed(String),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::MissingDestination => ErrorKind::UnprocessableEntity,
            RelayError::DeliveryFailed(_) => ErrorKind::BadGateway,
        }
    }
}

/// Errors from fetching the stats snapshot
///
/// Never shown to the user; the previous snapshot stays on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsFetchError {
    #[error("Stats request failed: {0}")]
    Transport(String),

    #[error("Stats endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Malformed stats response: {0}")]
    Malformed(String),
}

/// Errors raised by the host runtime primitives
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Host runtime unavailable: {0}")]
    Unavailable(String),

    #[error("Host rejected data: {0}")]
    Rejected(String),
}

/// Failure of one user-triggered verification attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestrationError {
    /// The host session carries no usable user identity or token
    #[error("Telegram session invalid")]
    SessionInvalid,

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl OrchestrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrchestrationError::SessionInvalid => ErrorKind::Unauthorized,
            OrchestrationError::Verification(e) => e.kind(),
            OrchestrationError::Relay(e) => e.kind(),
        }
    }

    /// Short status line shown to the user
    pub fn user_message(&self) -> String {
        match self {
            OrchestrationError::SessionInvalid => "❌ Telegram session invalid".to_string(),
            OrchestrationError::Verification(VerificationError::Timeout) => {
                "⏱️ Connection timeout. Please try again.".to_string()
            }
            OrchestrationError::Verification(VerificationError::ApiError(status)) => {
                format!("❌ API error: {status}")
            }
            OrchestrationError::Verification(VerificationError::Rejected(reason)) => {
                format!("❌ Error: {reason}")
            }
            OrchestrationError::Verification(VerificationError::Transport(_))
            | OrchestrationError::Verification(VerificationError::Malformed(_)) => {
                "🌐 Connection Error - Try Again".to_string()
            }
            OrchestrationError::Relay(RelayError::MissingDestination) => {
                "❌ Webhook missing".to_string()
            }
            OrchestrationError::Relay(RelayError::DeliveryFailed(_)) => {
                "❌ Verification delivery failed to bot.".to_string()
            }
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            OrchestrationError::SessionInvalid => {
                tracing::warn!("Verification attempted without a valid session");
            }
            OrchestrationError::Verification(VerificationError::Rejected(reason)) => {
                tracing::info!(reason = %reason, "Verifier rejected session");
            }
            OrchestrationError::Verification(e) => {
                tracing::warn!(error = %e, "Verification call failed");
            }
            OrchestrationError::Relay(RelayError::DeliveryFailed(e)) => {
                // The remote verification already succeeded; the bot never hears about it.
                tracing::error!(error = %e, "Verified outcome not delivered to bot");
            }
            OrchestrationError::Relay(e) => {
                tracing::warn!(error = %e, "Relay failed");
            }
        }
    }
}

impl From<OrchestrationError> for AppError {
    fn from(err: OrchestrationError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message).with_source(err)
    }
}

impl From<StatsFetchError> for AppError {
    fn from(err: StatsFetchError) -> Self {
        AppError::service_unavailable("Stats unavailable").with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let cases: Vec<(OrchestrationError, u16)> = vec![
            (OrchestrationError::SessionInvalid, 401),
            (VerificationError::Timeout.into(), 504),
            (VerificationError::ApiError(500).into(), 502),
            (VerificationError::Rejected("no".into()).into(), 403),
            (VerificationError::Transport("reset".into()).into(), 503),
            (RelayError::MissingDestination.into(), 422),
            (RelayError::DeliveryFailed("refused".into()).into(), 502),
        ];

        for (error, expected) in cases {
            assert_eq!(error.kind().status_code(), expected, "{error:?}");
        }
    }

    #[test]
    fn test_user_messages_are_distinct_per_kind() {
        let timeout = OrchestrationError::from(VerificationError::Timeout).user_message();
        let missing = OrchestrationError::from(RelayError::MissingDestination).user_message();
        let delivery =
            OrchestrationError::from(RelayError::DeliveryFailed("x".into())).user_message();

        assert!(timeout.contains("timeout"));
        assert!(missing.contains("Webhook missing"));
        assert!(delivery.contains("delivery failed"));
        assert_ne!(timeout, missing);
    }

    #[test]
    fn test_api_error_message_carries_status() {
        let msg = OrchestrationError::from(VerificationError::ApiError(429)).user_message();
        assert_eq!(msg, "❌ API error: 429");
    }

    #[test]
    fn test_rejected_message_carries_reason() {
        let msg =
            OrchestrationError::from(VerificationError::Rejected("Banned device".into()))
                .user_message();
        assert_eq!(msg, "❌ Error: Banned device");
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = OrchestrationError::from(VerificationError::Timeout).into();
        assert_eq!(app.status_code(), 504);
        assert!(app.message().contains("timed out"));
    }
}
