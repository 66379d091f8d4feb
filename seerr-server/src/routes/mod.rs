use axum::{Router, routing::get};

use crate::AppState;
use crate::handlers::discovery::{handle_catalog, handle_person, handle_status};

/// Create the `/discovery` API router
pub fn create_discovery_router() -> Router<AppState> {
    Router::new()
        .route(
            "/person/search",
            get(handle_person::person_search_handler),
        )
        .route(
            "/person/{id}",
            get(handle_person::person_filmography_handler),
        )
        .route(
            "/studio/search",
            get(handle_catalog::catalog_search_handler),
        )
        .route("/studio/{id}", get(handle_catalog::studio_catalog_handler))
        .route(
            "/network/{id}",
            get(handle_catalog::network_catalog_handler),
        )
        .route("/health", get(handle_status::health_handler))
        .route("/config", get(handle_status::client_config_handler))
}
