// src/repositories/favorites_store.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{FavoriteRecord, MovieId};
use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------

/// Per-user favorites collection keyed by movie id.
///
/// Backends are dumb data mappers: no validation, no event emission.
/// Errors are returned raw and classified by the gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Create or overwrite the record for (user, record.id)
    async fn put(&self, user_id: &str, record: &FavoriteRecord) -> AppResult<()>;

    /// Delete the record; a missing record is not an error
    async fn delete(&self, user_id: &str, movie_id: MovieId) -> AppResult<()>;

    async fn exists(&self, user_id: &str, movie_id: MovieId) -> AppResult<bool>;

    /// Every record of the user, order unspecified
    async fn list(&self, user_id: &str) -> AppResult<Vec<FavoriteRecord>>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------

pub struct SqliteFavoritesStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteFavoritesStore {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Run blocking SQLite work off the async runtime
    async fn blocking<T, F>(&self, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            work(&*conn)
        })
        .await?
    }

    fn row_to_record(row: &Row) -> Result<FavoriteRecord, rusqlite::Error> {
        let genre_json: String = row.get("genre_ids")?;
        let genre_ids: Vec<i64> = serde_json::from_str(&genre_json)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(FavoriteRecord {
            id: MovieId(row.get("movie_id")?),
            title: row.get("title")?,
            poster_path: row.get("poster_path")?,
            release_date: row.get("release_date")?,
            vote_average: row.get("vote_average")?,
            genre_ids,
        })
    }
}

#[async_trait]
impl FavoritesStore for SqliteFavoritesStore {
    async fn put(&self, user_id: &str, record: &FavoriteRecord) -> AppResult<()> {
        let user_id = user_id.to_string();
        let record = record.clone();
        let genre_json = serde_json::to_string(&record.genre_ids)?;

        self.blocking(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO favorites (
                    user_id, movie_id, title, poster_path, release_date,
                    vote_average, genre_ids, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    user_id,
                    record.id.value(),
                    record.title,
                    record.poster_path,
                    record.release_date,
                    record.vote_average,
                    genre_json,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, user_id: &str, movie_id: MovieId) -> AppResult<()> {
        let user_id = user_id.to_string();

        self.blocking(move |conn| {
            conn.execute(
                "DELETE FROM favorites WHERE user_id = ?1 AND movie_id = ?2",
                params![user_id, movie_id.value()],
            )?;
            Ok(())
        })
        .await
    }

    async fn exists(&self, user_id: &str, movie_id: MovieId) -> AppResult<bool> {
        let user_id = user_id.to_string();

        self.blocking(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = ?1 AND movie_id = ?2)",
                params![user_id, movie_id.value()],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn list(&self, user_id: &str) -> AppResult<Vec<FavoriteRecord>> {
        let user_id = user_id.to_string();

        self.blocking(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT movie_id, title, poster_path, release_date, vote_average, genre_ids
                 FROM favorites WHERE user_id = ?1 ORDER BY created_at, movie_id",
            )?;

            let records = stmt
                .query_map(params![user_id], Self::row_to_record)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(AppError::Database)?;

            Ok(records)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool, create_memory_pool, initialize_database};

    fn memory_store() -> SqliteFavoritesStore {
        let pool = create_memory_pool().unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteFavoritesStore::new(Arc::new(pool))
    }

    fn record(id: i64, title: &str) -> FavoriteRecord {
        FavoriteRecord {
            id: MovieId(id),
            title: title.to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            release_date: None,
            vote_average: 7.5,
            genre_ids: vec![18, 53],
        }
    }

    #[tokio::test]
    async fn test_put_exists_delete() {
        let store = memory_store();

        store.put("u1", &record(42, "Dune")).await.unwrap();
        assert!(store.exists("u1", MovieId(42)).await.unwrap());
        assert!(!store.exists("u2", MovieId(42)).await.unwrap());

        store.delete("u1", MovieId(42)).await.unwrap();
        assert!(!store.exists("u1", MovieId(42)).await.unwrap());

        // Deleting again is fine
        store.delete("u1", MovieId(42)).await.unwrap();
    }

    #[tokio::test]
    async fn test_put_is_upsert() {
        let store = memory_store();

        store.put("u1", &record(42, "Dune")).await.unwrap();
        store.put("u1", &record(42, "Dune: Part One")).await.unwrap();

        let records = store.list("u1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Dune: Part One");
    }

    #[tokio::test]
    async fn test_list_is_scoped_per_user() {
        let store = memory_store();

        store.put("u1", &record(1, "Heat")).await.unwrap();
        store.put("u1", &record(2, "Ronin")).await.unwrap();
        store.put("u2", &record(3, "Alien")).await.unwrap();

        let mut ids: Vec<i64> = store
            .list("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id.value())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);

        let other = store.list("u2").await.unwrap();
        assert_eq!(other[0].genre_ids, vec![18, 53]);
        assert!(store.list("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.db");

        {
            let pool = create_connection_pool(&path).unwrap();
            initialize_database(&pool.get().unwrap()).unwrap();
            let store = SqliteFavoritesStore::new(Arc::new(pool));
            store.put("u1", &record(42, "Dune")).await.unwrap();
        }

        let pool = create_connection_pool(&path).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        let store = SqliteFavoritesStore::new(Arc::new(pool));
        assert!(store.exists("u1", MovieId(42)).await.unwrap());
    }
}
