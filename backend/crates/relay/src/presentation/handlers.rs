//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::Uri;
use kernel::error::app_error::{AppError, AppResult};

use crate::domain::entities::StatsSnapshot;
use crate::domain::repository::StatsRepository;

/// Shared state for the stats handler
pub struct StatsAppState<R>
where
    R: StatsRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for StatsAppState<R>
where
    R: StatsRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// GET /api/stats
pub async fn stats<R>(State(state): State<StatsAppState<R>>) -> AppResult<Json<StatsSnapshot>>
where
    R: StatsRepository + Send + Sync + 'static,
{
    let snapshot = state.repo.snapshot().await.inspect_err(|e| {
        tracing::warn!(error = %e, "Stats snapshot unavailable");
    })?;
    Ok(Json(snapshot))
}

/// Any other /api/* path
pub async fn api_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No API route for {}", uri.path()))
}
