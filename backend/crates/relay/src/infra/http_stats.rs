//! HTTP Stats Source

use platform::query::Url;
use reqwest::Client;

use crate::domain::entities::StatsSnapshot;
use crate::domain::gateway::StatsSource;
use crate::error::StatsFetchError;

/// reqwest-backed stats source for `GET /api/stats`
#[derive(Debug, Clone)]
pub struct HttpStatsSource {
    client: Client,
    endpoint: Url,
}

impl HttpStatsSource {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

impl StatsSource for HttpStatsSource {
    async fn fetch(&self) -> Result<StatsSnapshot, StatsFetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| StatsFetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsFetchError::Status(status.as_u16()));
        }

        response
            .json::<StatsSnapshot>()
            .await
            .map_err(|e| StatsFetchError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_stats() -> String {
        let app = Router::new()
            .route(
                "/api/stats",
                get(|| async {
                    Json(json!({ "today": 4, "yesterday": 11, "total": 930, "online": 2 }))
                }),
            )
            .route(
                "/down/api/stats",
                get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let base = spawn_stats().await;
        let source = HttpStatsSource::new(
            Client::new(),
            Url::parse(&format!("{base}/api/stats")).unwrap(),
        );

        let snapshot = source.fetch().await.unwrap();
        assert_eq!(
            snapshot,
            StatsSnapshot {
                today: 4,
                yesterday: 11,
                total: 930,
                online: 2
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_non_success() {
        let base = spawn_stats().await;
        let source = HttpStatsSource::new(
            Client::new(),
            Url::parse(&format!("{base}/down/api/stats")).unwrap(),
        );

        assert_eq!(source.fetch().await, Err(StatsFetchError::Status(503)));
    }
}
