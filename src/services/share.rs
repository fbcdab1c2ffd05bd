use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{OwnerId, SharedList};
use crate::store::{FavoriteStore, ShareStore};

/// Freezes favorites lists into shareable read-only copies.
#[derive(Clone)]
pub struct ShareService {
    favorites: Arc<dyn FavoriteStore>,
    shares: Arc<dyn ShareStore>,
}

impl ShareService {
    pub fn new(favorites: Arc<dyn FavoriteStore>, shares: Arc<dyn ShareStore>) -> Self {
        Self { favorites, shares }
    }

    /// Captures the owner's current favorites under a fresh opaque token.
    ///
    /// An empty list is refused before anything is persisted. The token is
    /// a random v4 UUID: unguessable, and unique enough that a collision
    /// is treated as an internal fault by the store instead of retried.
    pub async fn create(&self, owner: OwnerId) -> AppResult<SharedList> {
        let current = self.favorites.list(owner).await?;
        if current.is_empty() {
            return Err(AppError::EmptyList(
                "cannot share an empty favorites list".to_string(),
            ));
        }

        let token = Uuid::new_v4();
        let list = self.shares.create(owner, token).await?;

        tracing::info!(
            owner = %owner,
            token = %list.token,
            members = list.favorites.len(),
            "Shared list created"
        );

        Ok(list)
    }

    /// Fetches a frozen list by its token.
    ///
    /// Deliberately unauthenticated: holding the token is the capability.
    pub async fn retrieve(&self, token: Uuid) -> AppResult<SharedList> {
        self.shares
            .get(token)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no shared list for token {token}")))
    }
}
