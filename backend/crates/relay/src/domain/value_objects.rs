//! Domain Value Objects
//!
//! Immutable value types for the relay domain.

use std::fmt;

use platform::query::{Url, parse_http_url, query_param};
use serde::Serialize;

/// Telegram user id of the mini-app session
///
/// Zero and negative ids are not user ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TelegramId(i64);

impl TelegramId {
    pub fn new(id: i64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TelegramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host init-data string that authenticates the session to the verifier
///
/// Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct InitDataToken(String);

impl InitDataToken {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.trim().is_empty()).then_some(Self(raw))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for InitDataToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InitDataToken").field(&"[REDACTED]").finish()
    }
}

/// Opaque device identifier produced by a fingerprint source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFingerprint(String);

impl DeviceFingerprint {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.is_empty()).then_some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Shared secret sent to the verifier in `X-API-KEY`
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

/// Bot-supplied URL the verified outcome is POSTed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination(Url);

impl Destination {
    /// Read the destination from a query parameter of the page URL
    ///
    /// A missing, empty or non-http(s) value yields `None`.
    pub fn from_page(page: &Url, param: &str) -> Option<Self> {
        query_param(page, param)
            .and_then(|raw| parse_http_url(&raw))
            .map(Self)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Path only; destination queries may carry bot secrets.
        write!(
            f,
            "{}://{}{}",
            self.0.scheme(),
            self.0.host_str().unwrap_or_default(),
            self.0.path()
        )
    }
}
