use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    error::AppResult,
    models::{Favorite, NewFavorite, OwnerId},
    state::AppState,
};

/// Lists the caller's favorites, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
) -> AppResult<Json<Vec<Favorite>>> {
    let favorites = state.favorites.list(owner).await?;
    Ok(Json(favorites))
}

/// Adds a movie to the caller's favorites
pub async fn add(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Json(new): Json<NewFavorite>,
) -> AppResult<(StatusCode, Json<Favorite>)> {
    let favorite = state.favorites.add(owner, new).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Removes a movie from the caller's favorites
pub async fn remove(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(tmdb_id): Path<i64>,
) -> AppResult<StatusCode> {
    state.favorites.remove(owner, tmdb_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
