use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Favorite, NewFavorite, OwnerId};
use crate::store::FavoriteStore;

/// Rules around an owner's favorites list: field validation, per-owner
/// uniqueness, and information hiding on removal.
#[derive(Clone)]
pub struct FavoriteService {
    store: Arc<dyn FavoriteStore>,
}

impl FavoriteService {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    /// The owner's favorites, newest first
    pub async fn list(&self, owner: OwnerId) -> AppResult<Vec<Favorite>> {
        self.store.list(owner).await
    }

    /// Validates and saves a movie to the owner's list.
    ///
    /// The explicit existence check gives the common case a clean error;
    /// when two adds of the same `(owner, tmdb_id)` race past it, the
    /// store's unique constraint decides the winner and the loser still
    /// gets `Duplicate` rather than a second row.
    pub async fn add(&self, owner: OwnerId, new: NewFavorite) -> AppResult<Favorite> {
        new.validate()?;

        if self.store.exists(owner, new.tmdb_id).await? {
            return Err(AppError::Duplicate(format!(
                "movie {} is already in the favorites list",
                new.tmdb_id
            )));
        }

        let favorite = self.store.insert(owner, new).await?;

        tracing::info!(
            owner = %owner,
            tmdb_id = favorite.tmdb_id,
            title = %favorite.title,
            "Favorite added"
        );

        Ok(favorite)
    }

    /// Removes the owner's favorite for `tmdb_id`.
    ///
    /// A movie saved by a different owner and a movie saved by nobody get
    /// the same `NotFound`; callers learn nothing about other lists.
    pub async fn remove(&self, owner: OwnerId, tmdb_id: i64) -> AppResult<()> {
        if !self.store.delete(owner, tmdb_id).await? {
            return Err(AppError::NotFound(format!(
                "movie {tmdb_id} is not in the favorites list"
            )));
        }

        tracing::info!(owner = %owner, tmdb_id, "Favorite removed");

        Ok(())
    }
}
