use crate::core::config::BackendKind;
use crate::core::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Liveness plus a summary of what the service is wired to
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: i64,
    pub backend: BackendKind,
    pub logged_in: bool,
    /// Heroes held by the collection served at `/api/heroes`
    pub mock_heroes: usize,
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64);

    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp,
        backend: state.config.backend.kind,
        logged_in: state.session.is_logged_in(),
        mock_heroes: state.mock_backend.len(),
    })
}
