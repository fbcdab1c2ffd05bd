use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Favorite, NewFavorite, OwnerId, SharedList};
use crate::store::{FavoriteStore, ShareStore};

/// In-memory storage used for local development and tests.
///
/// Mirrors the SQL schema: favorites keyed by the `(owner_id, tmdb_id)`
/// pair, shared lists keyed by token, each list carrying its own copy of
/// the members captured at creation. Insert-or-reject happens under a
/// single write lock, which plays the role of the composite unique
/// constraint.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    favorites: HashMap<(i64, i64), Favorite>,
    shared_lists: HashMap<Uuid, SharedList>,
}

impl Inner {
    fn favorites_of(&self, owner: OwnerId) -> Vec<Favorite> {
        let mut favorites: Vec<Favorite> = self
            .favorites
            .iter()
            .filter(|((owner_id, _), _)| *owner_id == owner.0)
            .map(|(_, favorite)| favorite.clone())
            .collect();

        favorites.sort_by(|a, b| b.added_at.cmp(&a.added_at).then(b.id.cmp(&a.id)));
        favorites
    }
}

impl MemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn list(&self, owner: OwnerId) -> AppResult<Vec<Favorite>> {
        Ok(self.inner.read().await.favorites_of(owner))
    }

    async fn exists(&self, owner: OwnerId, tmdb_id: i64) -> AppResult<bool> {
        Ok(self
            .inner
            .read()
            .await
            .favorites
            .contains_key(&(owner.0, tmdb_id)))
    }

    async fn insert(&self, owner: OwnerId, new: NewFavorite) -> AppResult<Favorite> {
        let mut inner = self.inner.write().await;

        let key = (owner.0, new.tmdb_id);
        if inner.favorites.contains_key(&key) {
            return Err(AppError::Duplicate(format!(
                "movie {} is already in the favorites list",
                new.tmdb_id
            )));
        }

        inner.next_id += 1;
        let favorite = Favorite {
            id: inner.next_id,
            tmdb_id: new.tmdb_id,
            title: new.title,
            poster_path: new.poster_path,
            rating: new.rating,
            release_date: new.release_date,
            added_at: Utc::now(),
        };
        inner.favorites.insert(key, favorite.clone());

        Ok(favorite)
    }

    async fn delete(&self, owner: OwnerId, tmdb_id: i64) -> AppResult<bool> {
        Ok(self
            .inner
            .write()
            .await
            .favorites
            .remove(&(owner.0, tmdb_id))
            .is_some())
    }
}

#[async_trait]
impl ShareStore for MemoryStore {
    async fn create(&self, owner: OwnerId, token: Uuid) -> AppResult<SharedList> {
        // one write lock spans the read and the insert: membership is
        // captured at a single consistent point
        let mut inner = self.inner.write().await;

        if inner.shared_lists.contains_key(&token) {
            return Err(AppError::Internal(format!(
                "share token collision: {token}"
            )));
        }

        let favorites = inner.favorites_of(owner);
        if favorites.is_empty() {
            return Err(AppError::EmptyList(
                "cannot share an empty favorites list".to_string(),
            ));
        }

        let list = SharedList {
            token,
            owner_id: owner,
            created_at: Utc::now(),
            favorites,
        };
        inner.shared_lists.insert(token, list.clone());

        Ok(list)
    }

    async fn get(&self, token: Uuid) -> AppResult<Option<SharedList>> {
        Ok(self.inner.read().await.shared_lists.get(&token).cloned())
    }
}
