//! Mini-app Server Entry Point
//!
//! Serves the static mini-app bundle and the read-only stats endpoint.
//! Uses `anyhow` for startup errors, but request-level errors use
//! `kernel::error::AppError`.

use axum::{
    Router,
    http::{self, Method, header},
};
use relay::ServerConfig;
use relay::infra::{FileStatsRepository, InMemoryStatsRepository};
use relay::miniapp_router;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let router = match &config.stats_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Serving stats from file");
            miniapp_router(FileStatsRepository::new(path), &config.static_dir)
        }
        None => {
            tracing::warn!("STATS_FILE not set, serving zeroed stats");
            miniapp_router(InMemoryStatsRepository::default(), &config.static_dir)
        }
    };

    // CORS configuration; the stats endpoint is read-only
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    let app = Router::new()
        .merge(router)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(static_dir = %config.static_dir.display(), "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
