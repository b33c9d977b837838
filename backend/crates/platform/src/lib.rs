//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Hashing utilities (SHA-256, hex encoding)
//! - Outbound HTTP client construction
//! - Query-string helpers for page URLs

pub mod crypto;
pub mod http;
pub mod query;
