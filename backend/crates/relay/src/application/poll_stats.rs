//! Poll Stats Use Case
//!
//! Fetches the aggregate counters snapshot and renders it. Independent of
//! the verification flow; a failed fetch keeps the previous snapshot.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::domain::entities::StatsSnapshot;
use crate::domain::gateway::StatsSource;
use crate::domain::host::StatusSurface;

/// Render a snapshot for the stats box
///
/// The four counters appear exactly as received.
pub fn render_stats(snapshot: &StatsSnapshot) -> String {
    format!(
        "📊 Today: {}\n📅 Yesterday: {}\n🔢 Total: {}\n🔌 Online: {}",
        snapshot.today, snapshot.yesterday, snapshot.total, snapshot.online
    )
}

/// Stats fetcher; owns the displayed snapshot
pub struct StatsFetcher<S, D>
where
    S: StatsSource,
    D: StatusSurface,
{
    source: Arc<S>,
    surface: Arc<D>,
    current: Mutex<StatsSnapshot>,
    /// Held across fetch and store so at most one poll is outstanding
    polling: tokio::sync::Mutex<()>,
}

impl<S, D> StatsFetcher<S, D>
where
    S: StatsSource,
    D: StatusSurface,
{
    pub fn new(source: Arc<S>, surface: Arc<D>) -> Self {
        Self {
            source,
            surface,
            current: Mutex::new(StatsSnapshot::default()),
            polling: tokio::sync::Mutex::new(()),
        }
    }

    /// Snapshot currently on display
    pub fn current(&self) -> StatsSnapshot {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch once; `None` means the displayed snapshot is unchanged
    ///
    /// Concurrent callers queue behind the outstanding poll, so a snapshot
    /// is never overwritten by one fetched earlier.
    pub async fn poll(&self) -> Option<StatsSnapshot> {
        let _outstanding = self.polling.lock().await;
        match self.source.fetch().await {
            Ok(snapshot) => {
                *self.current.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
                self.surface.render_stats(&render_stats(&snapshot));
                tracing::debug!(
                    today = snapshot.today,
                    total = snapshot.total,
                    online = snapshot.online,
                    "Stats refreshed"
                );
                Some(snapshot)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Stats fetch failed, keeping previous snapshot");
                None
            }
        }
    }

    /// Poll at startup and then every `interval` until shutdown
    pub async fn run(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Stats poller stopped");
                        return;
                    }
                }
            }
        }
    }
}
