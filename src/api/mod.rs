//! HTTP API handlers

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::client_config::ClientConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ClientConfig>,
    pub started: Instant,
}

impl AppState {
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client: Arc::new(client),
            started: Instant::now(),
        }
    }
}

/// General status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /status - Service health check
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "edu-admin",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

/// GET /client-config.json - Settings for the browser app
pub async fn client_config_handler(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(state.client.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handlers() {
        let state = AppState::new(ClientConfig {
            api_base_url: "https://api.example.test/api".into(),
            ..Default::default()
        });

        let Json(status) = status_handler(State(state.clone())).await;
        assert_eq!(status.service, "edu-admin");

        let Json(client) = client_config_handler(State(state)).await;
        assert_eq!(client.api_base_url, "https://api.example.test/api");
        assert_eq!(client.page_size_options, vec![10, 25, 50]);
    }
}
