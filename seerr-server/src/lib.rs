//! HTTP surface of the Seerr discovery engine.
//!
//! Everything is mounted under `/discovery`; see [`routes`] for the table.

pub mod dto;
pub mod handlers;
pub mod infra;
pub mod routes;

use axum::{Router, http::Method};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use infra::app_state::AppState;
pub use infra::errors::{AppError, AppResult};

/// Build the application router with its middleware stack.
pub fn create_app(state: AppState) -> Router {
    // The browser engine runs on the media server's origin, not ours.
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .nest("/discovery", routes::create_discovery_router())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
