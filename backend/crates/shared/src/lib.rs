//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! relay crate and both binaries:
//! - Common error types and result aliases
//! - Mapping of error kinds onto HTTP status codes
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
