use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Favorite, NewFavorite, OwnerId, SharedList};
use crate::store::{FavoriteStore, ShareStore};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// PostgreSQL-backed favorites and shared-list storage.
///
/// The `(owner_id, tmdb_id)` uniqueness rule and the token uniqueness rule
/// both live in the schema, so they hold across restarts and across
/// concurrent writers regardless of what the application layer checked
/// beforehand.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FavoriteRow {
    id: i64,
    tmdb_id: i64,
    title: String,
    poster_path: Option<String>,
    rating: f64,
    release_date: Option<NaiveDate>,
    added_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Favorite {
            id: row.id,
            tmdb_id: row.tmdb_id,
            title: row.title,
            poster_path: row.poster_path,
            rating: row.rating,
            release_date: row.release_date,
            added_at: row.added_at,
        }
    }
}

#[derive(FromRow)]
struct SharedListRow {
    id: i64,
    token: Uuid,
    owner_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct EntryRow {
    favorite_id: i64,
    tmdb_id: i64,
    title: String,
    poster_path: Option<String>,
    rating: f64,
    release_date: Option<NaiveDate>,
    added_at: DateTime<Utc>,
}

impl From<EntryRow> for Favorite {
    fn from(row: EntryRow) -> Self {
        Favorite {
            id: row.favorite_id,
            tmdb_id: row.tmdb_id,
            title: row.title,
            poster_path: row.poster_path,
            rating: row.rating,
            release_date: row.release_date,
            added_at: row.added_at,
        }
    }
}

async fn fetch_entries<'e, E>(executor: E, list_id: i64) -> AppResult<Vec<Favorite>>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let rows = sqlx::query_as::<_, EntryRow>(
        "SELECT favorite_id, tmdb_id, title, poster_path, rating, release_date, added_at
         FROM shared_list_entries
         WHERE list_id = $1
         ORDER BY added_at DESC, favorite_id DESC",
    )
    .bind(list_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(Favorite::from).collect())
}

#[async_trait]
impl FavoriteStore for PgStore {
    async fn list(&self, owner: OwnerId) -> AppResult<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT id, tmdb_id, title, poster_path, rating, release_date, added_at
             FROM favorites
             WHERE owner_id = $1
             ORDER BY added_at DESC, id DESC",
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    async fn exists(&self, owner: OwnerId, tmdb_id: i64) -> AppResult<bool> {
        let (found,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE owner_id = $1 AND tmdb_id = $2)",
        )
        .bind(owner.0)
        .bind(tmdb_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    async fn insert(&self, owner: OwnerId, new: NewFavorite) -> AppResult<Favorite> {
        let inserted = sqlx::query_as::<_, FavoriteRow>(
            "INSERT INTO favorites (owner_id, tmdb_id, title, poster_path, rating, release_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, tmdb_id, title, poster_path, rating, release_date, added_at",
        )
        .bind(owner.0)
        .bind(new.tmdb_id)
        .bind(&new.title)
        .bind(&new.poster_path)
        .bind(new.rating)
        .bind(new.release_date)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row.into()),
            // the composite unique constraint decides races the
            // application-level pre-check missed
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::Duplicate(format!(
                    "movie {} is already in the favorites list",
                    new.tmdb_id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, owner: OwnerId, tmdb_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE owner_id = $1 AND tmdb_id = $2")
            .bind(owner.0)
            .bind(tmdb_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ShareStore for PgStore {
    async fn create(&self, owner: OwnerId, token: Uuid) -> AppResult<SharedList> {
        let mut tx = self.pool.begin().await?;

        let list = sqlx::query_as::<_, SharedListRow>(
            "INSERT INTO shared_lists (token, owner_id)
             VALUES ($1, $2)
             RETURNING id, token, owner_id, created_at",
        )
        .bind(token)
        .bind(owner.0)
        .fetch_one(&mut *tx)
        .await;

        let list = match list {
            Ok(row) => row,
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(AppError::Internal(format!(
                    "share token collision: {token}"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        // One statement fixes membership at a single read point; copying
        // the columns keeps the list intact when live favorites are
        // removed later.
        let copied = sqlx::query(
            "INSERT INTO shared_list_entries
                 (list_id, favorite_id, tmdb_id, title, poster_path, rating, release_date, added_at)
             SELECT $1, id, tmdb_id, title, poster_path, rating, release_date, added_at
             FROM favorites
             WHERE owner_id = $2",
        )
        .bind(list.id)
        .bind(owner.0)
        .execute(&mut *tx)
        .await?;

        if copied.rows_affected() == 0 {
            // dropping the transaction rolls the list row back
            return Err(AppError::EmptyList(
                "cannot share an empty favorites list".to_string(),
            ));
        }

        let favorites = fetch_entries(&mut *tx, list.id).await?;
        tx.commit().await?;

        Ok(SharedList {
            token: list.token,
            owner_id: OwnerId(list.owner_id),
            created_at: list.created_at,
            favorites,
        })
    }

    async fn get(&self, token: Uuid) -> AppResult<Option<SharedList>> {
        let Some(list) = sqlx::query_as::<_, SharedListRow>(
            "SELECT id, token, owner_id, created_at FROM shared_lists WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let favorites = fetch_entries(&self.pool, list.id).await?;

        Ok(Some(SharedList {
            token: list.token,
            owner_id: OwnerId(list.owner_id),
            created_at: list.created_at,
            favorites,
        }))
    }
}
