use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Favorite, OwnerId};

/// A read-only copy of an owner's favorites, frozen at creation time.
///
/// The token is the only handle: whoever holds it may read the list, and
/// nothing about the owner is derivable from it. Membership is copied out
/// of the live list when the row is created and never recomputed, so
/// adding or removing favorites afterwards leaves existing shared lists
/// untouched.
#[derive(Debug, Clone, Serialize)]
pub struct SharedList {
    pub token: Uuid,
    #[serde(skip_serializing)]
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
    pub favorites: Vec<Favorite>,
}
