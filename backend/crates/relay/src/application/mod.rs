//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod messages;
pub mod orchestrator;
pub mod poll_stats;
pub mod relay_outcome;
pub mod verify_session;

// Re-exports
pub use config::{RelayConfig, ServerConfig};
pub use orchestrator::{AttemptOutcome, OrchestratorPorts, VerificationOrchestrator};
pub use poll_stats::{StatsFetcher, render_stats};
pub use relay_outcome::{Completion, WebhookRelay};
pub use verify_session::VerificationClient;
