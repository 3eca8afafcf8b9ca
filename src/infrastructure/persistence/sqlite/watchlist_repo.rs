//! SQLite Watchlist Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use super::book_repo::{BookRow, BOOK_COLUMNS};
use super::database::{db_error, decode_timestamp, write_error};
use super::DbPool;
use crate::application::ports::{
    BookRecord, RepositoryError, WatchlistBookRecord, WatchlistRecord, WatchlistRepositoryPort,
};

/// SQLite Watchlist Repository
pub struct SqliteWatchlistRepository {
    pool: DbPool,
}

impl SqliteWatchlistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const WATCHLIST_SELECT: &str = r#"
    SELECT w.id, w.name, w.description, w.created_at,
           (SELECT COUNT(*) FROM watchlist_books wb WHERE wb.watchlist_id = w.id) AS book_count
    FROM watchlists w
"#;

#[derive(FromRow)]
struct WatchlistRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: String,
    book_count: i64,
}

impl TryFrom<WatchlistRow> for WatchlistRecord {
    type Error = RepositoryError;

    fn try_from(row: WatchlistRow) -> Result<Self, Self::Error> {
        Ok(WatchlistRecord {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: decode_timestamp(&row.created_at)?,
            book_count: row.book_count,
        })
    }
}

#[derive(FromRow)]
struct WatchlistBookRow {
    #[sqlx(flatten)]
    book: BookRow,
    watched_at: String,
}

impl TryFrom<WatchlistBookRow> for WatchlistBookRecord {
    type Error = RepositoryError;

    fn try_from(row: WatchlistBookRow) -> Result<Self, Self::Error> {
        Ok(WatchlistBookRecord {
            book: BookRecord::try_from(row.book)?,
            added_at: decode_timestamp(&row.watched_at)?,
        })
    }
}

#[async_trait]
impl WatchlistRepositoryPort for SqliteWatchlistRepository {
    async fn create(&self, name: &str, description: Option<&str>) -> Result<i64, RepositoryError> {
        let result = sqlx::query("INSERT INTO watchlists (name, description, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(description)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, || format!("watchlist '{}' already exists", name)))?;

        Ok(result.last_insert_rowid())
    }

    async fn find_all(&self) -> Result<Vec<WatchlistRecord>, RepositoryError> {
        let rows: Vec<WatchlistRow> =
            sqlx::query_as(&format!("{} ORDER BY w.created_at DESC, w.id DESC", WATCHLIST_SELECT))
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        rows.into_iter().map(WatchlistRecord::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<WatchlistRecord>, RepositoryError> {
        let row: Option<WatchlistRow> = sqlx::query_as(&format!("{} WHERE w.id = ?", WATCHLIST_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(WatchlistRecord::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM watchlist_books WHERE watchlist_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        sqlx::query("DELETE FROM watchlists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn add_book(&self, watchlist_id: i64, book_id: i64) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO watchlist_books (watchlist_id, book_id, added_at) VALUES (?, ?, ?)")
            .bind(watchlist_id)
            .bind(book_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                write_error(e, || {
                    format!("book {} is already in watchlist {}", book_id, watchlist_id)
                })
            })?;

        Ok(())
    }

    async fn remove_book(&self, watchlist_id: i64, book_id: i64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM watchlist_books WHERE watchlist_id = ? AND book_id = ?")
            .bind(watchlist_id)
            .bind(book_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn find_books(&self, watchlist_id: i64) -> Result<Vec<WatchlistBookRecord>, RepositoryError> {
        let rows: Vec<WatchlistBookRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}, wb.added_at AS watched_at
            FROM watchlist_books wb
            JOIN books b ON b.id = wb.book_id
            WHERE wb.watchlist_id = ?
            ORDER BY wb.added_at DESC, b.id DESC
            "#,
            BOOK_COLUMNS
        ))
        .bind(watchlist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(WatchlistBookRecord::try_from).collect()
    }
}
