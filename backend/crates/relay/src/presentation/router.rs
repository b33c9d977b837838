//! Mini-app Router

use std::path::Path;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::services::{ServeDir, ServeFile};

use crate::domain::repository::StatsRepository;
use crate::presentation::handlers::{self, StatsAppState};

/// Create the mini-app router
///
/// - `GET /api/stats` returns the current snapshot
/// - other `/api/*` paths return 404
/// - everything else is served from `static_dir`, falling back to
///   `index.html` for unknown paths
pub fn miniapp_router<R>(repo: R, static_dir: impl AsRef<Path>) -> Router
where
    R: StatsRepository + Send + Sync + 'static,
{
    let state = StatsAppState {
        repo: Arc::new(repo),
    };

    let api = Router::new()
        .route("/stats", get(handlers::stats::<R>))
        .fallback(handlers::api_not_found)
        .with_state(state);

    let static_dir = static_dir.as_ref();
    let assets =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new().nest("/api", api).fallback_service(assets)
}
