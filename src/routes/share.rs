use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{OwnerId, SharedList},
    state::AppState,
};

/// Freezes the caller's favorites into a new shared list
pub async fn generate(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
) -> AppResult<(StatusCode, Json<SharedList>)> {
    let list = state.shares.create(owner).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// Fetches a frozen list by token; unauthenticated on purpose
pub async fn retrieve(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> AppResult<Json<SharedList>> {
    let list = state.shares.retrieve(token).await?;
    Ok(Json(list))
}
