//! Stats Repository Implementations
//!
//! The counters are maintained by an external store; these read its
//! current snapshot.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use kernel::error::app_error::AppResult;

use crate::domain::entities::StatsSnapshot;
use crate::domain::repository::StatsRepository;

/// In-memory stats repository
#[derive(Debug, Default)]
pub struct InMemoryStatsRepository {
    snapshot: RwLock<StatsSnapshot>,
}

impl InMemoryStatsRepository {
    pub fn new(snapshot: StatsSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Replace the snapshot wholesale
    pub fn replace(&self, snapshot: StatsSnapshot) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}

impl StatsRepository for InMemoryStatsRepository {
    async fn snapshot(&self) -> AppResult<StatsSnapshot> {
        Ok(*self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }
}

/// JSON-file stats repository
///
/// The file is re-read on every request, so the writer can replace it at
/// any time.
#[derive(Debug, Clone)]
pub struct FileStatsRepository {
    path: PathBuf,
}

impl FileStatsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatsRepository for FileStatsRepository {
    async fn snapshot(&self) -> AppResult<StatsSnapshot> {
        let raw = tokio::fs::read(&self.path).await?;
        let snapshot = serde_json::from_slice(&raw)?;
        Ok(snapshot)
    }
}
