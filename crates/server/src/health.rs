use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::chat::ChatState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub backend: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: ChatState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<ChatState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = backend_check(&state).await;
    let ready = backend.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "souq-server runtime initialized".to_string(),
        },
        backend,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

// The categories listing is public on the backend, which makes it a cheap
// readiness probe that needs no credentials.
async fn backend_check(state: &ChatState) -> HealthCheck {
    match state.backend.get_json("/api/categories", None).await {
        Ok(_) => HealthCheck { status: "ready", detail: "backend probe succeeded".to_string() },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("backend probe failed: {error}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use axum::{extract::State, http::StatusCode, Json};
    use serde_json::{json, Value};
    use souq_agent::{BackendApi, IntentResolver};

    use crate::chat::ChatState;
    use crate::health::health;

    struct StaticBackend {
        reachable: bool,
    }

    #[async_trait]
    impl BackendApi for StaticBackend {
        async fn get_json(&self, path: &str, _token: Option<&str>) -> Result<Value> {
            if self.reachable {
                Ok(json!({ "data": [] }))
            } else {
                bail!("connection refused for {path}")
            }
        }
    }

    fn state(reachable: bool) -> ChatState {
        let backend = Arc::new(StaticBackend { reachable });
        let resolver = Arc::new(IntentResolver::new(backend.clone(), "http://shop.souq.test"));
        ChatState { resolver, backend }
    }

    #[tokio::test]
    async fn health_returns_ready_when_backend_is_reachable() {
        let (status, Json(payload)) = health(State(state(true))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.backend.status, "ready");
        assert_eq!(payload.service.status, "ready");
    }

    #[tokio::test]
    async fn health_returns_service_unavailable_when_backend_is_down() {
        let (status, Json(payload)) = health(State(state(false))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.backend.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
