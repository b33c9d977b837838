//! Repository Traits
//!
//! Server-side read access to the stats store. The store itself is
//! maintained elsewhere; this crate only reads snapshots.

use kernel::error::app_error::AppResult;

use crate::domain::entities::StatsSnapshot;

/// Stats repository trait
#[trait_variant::make(StatsRepository: Send)]
pub trait LocalStatsRepository {
    /// Current counters, replaced wholesale by the store
    async fn snapshot(&self) -> AppResult<StatsSnapshot>;
}
