use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Longest accepted movie title, matching the column width
const MAX_TITLE_LEN: usize = 255;

/// A movie saved to an owner's favorites list.
///
/// Records are immutable once created; `added_at` is stamped by the store
/// at insert time and drives the newest-first ordering of every listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub tmdb_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub rating: f64,
    pub release_date: Option<NaiveDate>,
    pub added_at: DateTime<Utc>,
}

/// Payload for adding a movie to the favorites list
#[derive(Debug, Clone, Deserialize)]
pub struct NewFavorite {
    pub tmdb_id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl NewFavorite {
    /// Checks the fields a favorite must carry before it may be persisted.
    ///
    /// Ratings come from the catalog on a 0-10 scale with a single
    /// fractional digit; anything finer is a malformed request, not a
    /// rounding candidate.
    pub fn validate(&self) -> AppResult<()> {
        if self.tmdb_id <= 0 {
            return Err(AppError::Validation(
                "tmdb_id must be a positive integer".to_string(),
            ));
        }

        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be blank".to_string()));
        }

        if self.title.len() > MAX_TITLE_LEN {
            return Err(AppError::Validation(format!(
                "title must be at most {MAX_TITLE_LEN} characters"
            )));
        }

        if !self.rating.is_finite() || !(0.0..=10.0).contains(&self.rating) {
            return Err(AppError::Validation(
                "rating must be between 0.0 and 10.0".to_string(),
            ));
        }

        let tenths = self.rating * 10.0;
        if (tenths - tenths.round()).abs() > 1e-6 {
            return Err(AppError::Validation(
                "rating must have at most one fractional digit".to_string(),
            ));
        }

        Ok(())
    }
}
