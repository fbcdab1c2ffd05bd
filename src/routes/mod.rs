use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::require_owner;
use crate::state::AppState;

pub mod favorites;
pub mod search;
pub mod share;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes under /api
fn api_routes(state: AppState) -> Router<AppState> {
    let owner_routes = Router::new()
        .route("/search", get(search::search))
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route("/favorites/:tmdb_id", delete(favorites::remove))
        .route("/share/generate", post(share::generate))
        .route_layer(from_fn_with_state(state, require_owner));

    // shared-list retrieval stays public: the token is the whole credential
    let public_routes = Router::new().route("/share/:token", get(share::retrieve));

    owner_routes.merge(public_routes)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
