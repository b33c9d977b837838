//! Mini-app Verification Relay
//!
//! Clean Architecture structure:
//! - `domain/` - Session, verification result, payload and state types; port traits
//! - `application/` - Use cases (verify, relay, orchestrate, poll stats)
//! - `infra/` - reqwest gateways, device fingerprinting, stats stores
//! - `presentation/` - HTTP router for the mini-app server
//!
//! ## Relay Model
//! - Detection (VPN, multi-account) is done by the remote verifier, never here
//! - One user trigger issues at most one verification call and at most one webhook POST
//! - Nothing is retried automatically; a failed attempt re-enables the retry control
//! - The verification call is bounded by a hard deadline; the loser of the race is dropped

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{RelayConfig, ServerConfig};
pub use application::orchestrator::{AttemptOutcome, VerificationOrchestrator};
pub use error::{OrchestrationError, RelayError, VerificationError};
pub use presentation::router::miniapp_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::state::*;
    pub use crate::domain::value_objects::*;
}
