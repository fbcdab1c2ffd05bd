use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::AppResult, models::CatalogMovie, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: String,
}

/// Handler for the catalog search endpoint
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<CatalogMovie>>> {
    let movies = state.catalog.search(&params.query).await?;
    Ok(Json(movies))
}
