//! Log-backed status surface

use relay::domain::host::StatusSurface;

/// Writes status lines and stats renders to the log
#[derive(Debug, Default)]
pub struct TracingSurface;

impl StatusSurface for TracingSurface {
    fn show_message(&self, message: &str) {
        tracing::info!(target: "miniapp::status", "{message}");
    }

    fn set_retry_enabled(&self, enabled: bool) {
        tracing::debug!(enabled, "Retry control updated");
    }

    fn render_stats(&self, rendered: &str) {
        tracing::info!(target: "miniapp::stats", "{}", rendered.replace('\n', " | "));
    }
}
