use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::info;

use crate::dto::PersonDiscoveryResponse;
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

#[derive(Debug, Deserialize)]
pub struct PersonSearchQuery {
    pub name: String,
}

/// Filmography of a person by provider id.
pub async fn person_filmography_handler(
    State(state): State<AppState>,
    Path(person_id): Path<u64>,
) -> AppResult<Json<PersonDiscoveryResponse>> {
    info!(person_id, "person filmography requested");
    let found = state.discovery.person_filmography(person_id).await?;
    Ok(Json(found.into()))
}

/// Filmography of the best name match.
pub async fn person_search_handler(
    State(state): State<AppState>,
    Query(query): Query<PersonSearchQuery>,
) -> AppResult<Json<PersonDiscoveryResponse>> {
    let name = query.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }

    info!(name, "person search requested");
    let found = state.discovery.search_person(name).await?;
    Ok(Json(found.into()))
}
