//! Movie catalog abstraction.
//!
//! The service only ever searches the catalog; favorites carry their own
//! copy of the fields they need, so there is no detail lookup and no
//! caching layer in front of this trait.

use crate::error::AppResult;
use crate::models::CatalogMovie;

pub mod tmdb;

pub use tmdb::TmdbCatalog;

/// Trait for movie catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search movies by free-text query.
    ///
    /// Returns matches trimmed to the fields the frontend renders; a blank
    /// query is rejected before any request goes out.
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogMovie>>;
}
