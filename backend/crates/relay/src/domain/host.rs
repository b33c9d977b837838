//! Host Runtime and Display Surface
//!
//! Interfaces to the embedding mini-app environment. Implementations
//! live outside this crate (a browser bridge, a headless driver, test fakes).

use platform::query::Url;

use crate::error::HostError;

/// Session data as reported by the host, before validation
#[derive(Debug, Clone, Default)]
pub struct HostSession {
    pub user_id: Option<i64>,
    pub init_data: String,
    pub username: Option<String>,
}

/// Host runtime primitives consumed by the relay
#[trait_variant::make(HostRuntime: Send)]
pub trait LocalHostRuntime {
    /// Current user identity and init-data token
    fn session(&self) -> HostSession;

    /// URL of the page the mini-app was opened with
    fn page_url(&self) -> Option<Url>;

    /// Expand the viewport; best-effort
    fn expand(&self);

    /// Hand data to the host's session-closing mechanism
    async fn send_data(&self, data: String) -> Result<(), HostError>;

    /// Terminate the host session
    async fn close(&self) -> Result<(), HostError>;
}

/// User-visible surface: status line, retry control, stats box
pub trait StatusSurface: Send + Sync {
    fn show_message(&self, message: &str);

    fn set_retry_enabled(&self, enabled: bool);

    fn render_stats(&self, rendered: &str);
}
