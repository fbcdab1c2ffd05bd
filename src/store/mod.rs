use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Favorite, NewFavorite, OwnerId, SharedList};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{create_pool, PgStore};

/// Persistence for favorite records.
///
/// Implementations must hold a composite unique constraint on
/// `(owner_id, tmdb_id)` so concurrent inserts of the same pair cannot
/// both succeed; the loser surfaces as `AppError::Duplicate`.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All favorites of one owner, newest `added_at` first.
    async fn list(&self, owner: OwnerId) -> AppResult<Vec<Favorite>>;

    /// Whether the owner already saved this movie.
    async fn exists(&self, owner: OwnerId, tmdb_id: i64) -> AppResult<bool>;

    /// Inserts a validated favorite, stamping `added_at`.
    async fn insert(&self, owner: OwnerId, new: NewFavorite) -> AppResult<Favorite>;

    /// Deletes the owner's favorite for `tmdb_id`, reporting whether a row
    /// was actually removed.
    async fn delete(&self, owner: OwnerId, tmdb_id: i64) -> AppResult<bool>;
}

/// Persistence for shared lists and their frozen membership.
#[async_trait]
pub trait ShareStore: Send + Sync {
    /// Freezes the owner's current favorites under `token`.
    ///
    /// Membership is captured at a single consistent read point, and an
    /// empty set is refused here as well, so a racing removal cannot
    /// produce a memberless list. A token collision is an internal fault,
    /// not a caller error.
    async fn create(&self, owner: OwnerId, token: Uuid) -> AppResult<SharedList>;

    /// Looks up a shared list with its frozen members, newest first.
    async fn get(&self, token: Uuid) -> AppResult<Option<SharedList>>;
}
