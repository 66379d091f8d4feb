use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;

use crate::dto::{NameQuery, PageQuery, StudioDiscoveryResponse, clamp_page};
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

pub async fn studio_catalog_handler(
    State(state): State<AppState>,
    Path(studio_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<StudioDiscoveryResponse>> {
    let page = clamp_page(query.page);
    info!(studio_id, page, "studio catalog requested");
    let catalog = state.discovery.studio_catalog(studio_id, page).await?;
    Ok(Json(catalog.into()))
}

pub async fn network_catalog_handler(
    State(state): State<AppState>,
    Path(network_id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<StudioDiscoveryResponse>> {
    let page = clamp_page(query.page);
    info!(network_id, page, "network catalog requested");
    let catalog = state.discovery.network_catalog(network_id, page).await?;
    Ok(Json(catalog.into()))
}

/// Studio and/or network catalog for a display name.
pub async fn catalog_search_handler(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<StudioDiscoveryResponse>> {
    let name = query.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }

    let page = clamp_page(query.page);
    info!(name, page, "catalog search requested");
    let catalog = state.discovery.search_catalog(name, page).await?;
    Ok(Json(catalog.into()))
}
