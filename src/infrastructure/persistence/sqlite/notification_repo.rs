//! SQLite Notification Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::{db_error, decode_timestamp};
use super::DbPool;
use crate::application::ports::{NotificationRecord, NotificationRepositoryPort, RepositoryError};

/// SQLite Notification Repository
///
/// 通知由图书仓储在更新价格的事务中写入，这里只负责读取和标记已读。
pub struct SqliteNotificationRepository {
    pool: DbPool,
}

impl SqliteNotificationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct NotificationRow {
    id: i64,
    book_id: i64,
    book_title: String,
    book_author: String,
    message: String,
    notification_type: String,
    is_read: bool,
    created_at: String,
}

impl TryFrom<NotificationRow> for NotificationRecord {
    type Error = RepositoryError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(NotificationRecord {
            id: row.id,
            book_id: row.book_id,
            book_title: row.book_title,
            book_author: row.book_author,
            message: row.message,
            notification_type: row.notification_type,
            is_read: row.is_read,
            created_at: decode_timestamp(&row.created_at)?,
        })
    }
}

#[async_trait]
impl NotificationRepositoryPort for SqliteNotificationRepository {
    async fn find_recent(&self, limit: usize) -> Result<Vec<NotificationRecord>, RepositoryError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT n.id, n.book_id, b.title AS book_title, b.author AS book_author,
                   n.message, n.notification_type, n.is_read, n.created_at
            FROM notifications n
            JOIN books b ON b.id = n.book_id
            ORDER BY n.created_at DESC, n.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(NotificationRecord::try_from).collect()
    }

    async fn mark_read(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_unread(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE is_read = 0")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count)
    }
}
