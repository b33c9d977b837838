//! Presentation Layer
//!
//! HTTP handlers and router for the mini-app server.

pub mod handlers;
pub mod router;
