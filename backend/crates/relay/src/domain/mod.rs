//! Domain Layer - Relay types and interfaces
//!
//! This layer contains:
//! - Domain entities (Session, VerificationResult, WebhookPayload, StatsSnapshot)
//! - Domain value objects (TelegramId, InitDataToken, Destination)
//! - The orchestration state machine
//! - Gateway, host and repository traits (interfaces)

pub mod entities;
pub mod gateway;
pub mod host;
pub mod repository;
pub mod state;
pub mod value_objects;
