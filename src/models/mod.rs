use std::fmt::Display;

use serde::{Deserialize, Serialize};

mod catalog;
mod favorite;
mod shared_list;

pub use catalog::{CatalogMovie, TmdbMovie, TmdbSearchResponse};
pub use favorite::{Favorite, NewFavorite};
pub use shared_list::SharedList;

/// Identifier of the authenticated user owning favorites and shared lists.
///
/// Owners are resolved by the deployment's auth layer; this crate never
/// issues or verifies credentials itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

impl Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
