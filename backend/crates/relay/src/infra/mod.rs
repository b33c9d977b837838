//! Infrastructure Layer
//!
//! HTTP gateways, device fingerprinting and stats repositories.

pub mod fingerprint;
pub mod http_stats;
pub mod http_verifier;
pub mod http_webhook;
pub mod stats_store;

pub use fingerprint::DeviceFingerprinter;
pub use http_stats::HttpStatsSource;
pub use http_verifier::HttpVerifierGateway;
pub use http_webhook::HttpWebhookGateway;
pub use stats_store::{FileStatsRepository, InMemoryStatsRepository};
