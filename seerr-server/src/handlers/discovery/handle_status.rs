use axum::{Json, extract::State};

use crate::dto::{ClientConfigResponse, HealthResponse};
use crate::infra::app_state::AppState;

/// Always 200; upstream problems are reported in the body.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.discovery.health().await.into())
}

pub async fn client_config_handler(
    State(state): State<AppState>,
) -> Json<ClientConfigResponse> {
    Json(ClientConfigResponse::from(state.config()))
}
