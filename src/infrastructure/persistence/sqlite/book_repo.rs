//! SQLite Book Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use super::database::{db_error, decode_decimal, decode_timestamp, encode_decimal, write_error};
use super::DbPool;
use crate::application::ports::{
    BookRecord, BookRepositoryPort, NewBook, PriceChange, PriceHistoryRecord, PriceUpdate,
    RepositoryError,
};
use crate::domain::book::{detect_changes, parse_category_tags, ChangeThresholds, PriceSnapshot};

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(super) const BOOK_COLUMNS: &str = "b.id, b.isbn, b.title, b.author, b.current_price, b.rating, \
     b.reviews_count, b.page_count, b.category, b.publisher, b.published_date, b.description, \
     b.thumbnail_url, b.added_at, b.last_updated";

#[derive(FromRow)]
pub(super) struct BookRow {
    id: i64,
    isbn: Option<String>,
    title: String,
    author: String,
    current_price: Option<String>,
    rating: Option<String>,
    reviews_count: Option<i64>,
    page_count: Option<i64>,
    category: Option<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    description: Option<String>,
    thumbnail_url: Option<String>,
    added_at: String,
    last_updated: String,
}

impl TryFrom<BookRow> for BookRecord {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(BookRecord {
            id: row.id,
            isbn: row.isbn,
            title: row.title,
            author: row.author,
            current_price: decode_decimal(row.current_price)?,
            rating: decode_decimal(row.rating)?,
            reviews_count: row.reviews_count,
            page_count: row.page_count,
            category: row.category,
            publisher: row.publisher,
            published_date: row.published_date,
            description: row.description,
            thumbnail_url: row.thumbnail_url,
            added_at: decode_timestamp(&row.added_at)?,
            last_updated: decode_timestamp(&row.last_updated)?,
        })
    }
}

#[derive(FromRow)]
struct PriceHistoryRow {
    id: i64,
    book_id: i64,
    price: Option<String>,
    rating: Option<String>,
    reviews_count: Option<i64>,
    snapshot_at: String,
}

impl TryFrom<PriceHistoryRow> for PriceHistoryRecord {
    type Error = RepositoryError;

    fn try_from(row: PriceHistoryRow) -> Result<Self, Self::Error> {
        Ok(PriceHistoryRecord {
            id: row.id,
            book_id: row.book_id,
            price: decode_decimal(row.price)?,
            rating: decode_decimal(row.rating)?,
            reviews_count: row.reviews_count,
            snapshot_at: decode_timestamp(&row.snapshot_at)?,
        })
    }
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn insert(&self, book: &NewBook) -> Result<i64, RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let result = sqlx::query(
            r#"
            INSERT INTO books (isbn, title, author, current_price, rating, reviews_count, page_count,
                               category, publisher, published_date, description, thumbnail_url,
                               added_at, last_updated)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(encode_decimal(book.price))
        .bind(encode_decimal(book.rating))
        .bind(book.reviews_count)
        .bind(book.page_count)
        .bind(&book.category)
        .bind(&book.publisher)
        .bind(&book.published_date)
        .bind(&book.description)
        .bind(&book.thumbnail_url)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            write_error(e, || {
                format!("book with ISBN {} already tracked", book.isbn.as_deref().unwrap_or(""))
            })
        })?;

        let book_id = result.last_insert_rowid();

        // 带价格时记录首条快照
        if book.price.is_some() {
            sqlx::query(
                "INSERT INTO price_history (book_id, price, rating, reviews_count, snapshot_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(book_id)
            .bind(encode_decimal(book.price))
            .bind(encode_decimal(book.rating))
            .bind(book.reviews_count)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;

        Ok(book_id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepositoryError> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("SELECT {} FROM books b WHERE b.id = ?", BOOK_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(BookRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(&format!(
            "SELECT {} FROM books b ORDER BY b.added_at DESC, b.id DESC",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(BookRecord::try_from).collect()
    }

    async fn find_sharing_category(
        &self,
        exclude_id: i64,
        tags: &[String],
    ) -> Result<Vec<BookRecord>, RepositoryError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<BookRow> = sqlx::query_as(&format!(
            "SELECT {} FROM books b WHERE b.id != ? AND b.category IS NOT NULL ORDER BY b.id",
            BOOK_COLUMNS
        ))
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        // 分类为逗号分隔文本，标签匹配忽略大小写，只能在取出后过滤
        let shares_tag = |category: &str| {
            parse_category_tags(category)
                .iter()
                .any(|tag| tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
        };

        rows.into_iter()
            .filter(|row| row.category.as_deref().map_or(false, |c| shares_tag(c)))
            .map(BookRecord::try_from)
            .collect()
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for statement in [
            "DELETE FROM price_history WHERE book_id = ?",
            "DELETE FROM notifications WHERE book_id = ?",
            "DELETE FROM watchlist_books WHERE book_id = ?",
            "DELETE FROM books WHERE id = ?",
        ] {
            sqlx::query(statement)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn find_price_history(&self, book_id: i64) -> Result<Vec<PriceHistoryRecord>, RepositoryError> {
        let rows: Vec<PriceHistoryRow> = sqlx::query_as(
            "SELECT id, book_id, price, rating, reviews_count, snapshot_at FROM price_history WHERE book_id = ? ORDER BY snapshot_at ASC, id ASC",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(PriceHistoryRecord::try_from).collect()
    }

    async fn update_price(
        &self,
        book_id: i64,
        update: &PriceUpdate,
        thresholds: &ChangeThresholds,
    ) -> Result<PriceChange, RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // 先写后读：首条语句即取得写锁，并发更新在此排队，读到的现值不会过期
        let touched = sqlx::query("UPDATE books SET last_updated = ? WHERE id = ?")
            .bind(&now)
            .bind(book_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        if touched.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("book {}", book_id)));
        }

        let (stored_price, stored_rating, stored_reviews): (Option<String>, Option<String>, Option<i64>) =
            sqlx::query_as("SELECT current_price, rating, reviews_count FROM books WHERE id = ?")
                .bind(book_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error)?;

        let previous = PriceSnapshot {
            price: decode_decimal(stored_price)?,
            rating: decode_decimal(stored_rating)?,
        };
        let rating = update.rating.or(previous.rating);
        let reviews_count = update.reviews_count.or(stored_reviews);
        let next = PriceSnapshot {
            price: update.price,
            rating,
        };
        let notices = detect_changes(&previous, &next, thresholds);

        sqlx::query("UPDATE books SET current_price = ?, rating = ?, reviews_count = ? WHERE id = ?")
            .bind(encode_decimal(update.price))
            .bind(encode_decimal(rating))
            .bind(reviews_count)
            .bind(book_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        sqlx::query(
            "INSERT INTO price_history (book_id, price, rating, reviews_count, snapshot_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(book_id)
        .bind(encode_decimal(update.price))
        .bind(encode_decimal(rating))
        .bind(reviews_count)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        for notice in &notices {
            sqlx::query(
                "INSERT INTO notifications (book_id, message, notification_type, is_read, created_at) VALUES (?, ?, ?, 0, ?)",
            )
            .bind(book_id)
            .bind(&notice.message)
            .bind(notice.kind.as_str())
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;

        Ok(PriceChange { previous, notices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::memory_pool;
    use rust_decimal::Decimal;

    fn book(title: &str, isbn: Option<&str>, category: Option<&str>) -> NewBook {
        NewBook {
            isbn: isbn.map(str::to_string),
            title: title.to_string(),
            author: "Author".to_string(),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = SqliteBookRepository::new(memory_pool().await);
        let id = repo
            .insert(&NewBook {
                price: Some(Decimal::new(1499, 2)),
                page_count: Some(320),
                ..book("Dune", Some("9780441013593"), Some("Science Fiction"))
            })
            .await
            .unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.title, "Dune");
        assert_eq!(found.current_price, Some(Decimal::new(1499, 2)));
        assert_eq!(found.page_count, Some(320));
        assert_eq!(repo.find_price_history(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_book_without_price_has_no_history() {
        let repo = SqliteBookRepository::new(memory_pool().await);
        let id = repo.insert(&book("Draft", None, None)).await.unwrap();
        assert!(repo.find_price_history(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_isbn() {
        let repo = SqliteBookRepository::new(memory_pool().await);
        repo.insert(&book("A", Some("123"), None)).await.unwrap();
        let err = repo.insert(&book("B", Some("123"), None)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));

        // 无 ISBN 的图书可以有多本
        repo.insert(&book("C", None, None)).await.unwrap();
        repo.insert(&book("D", None, None)).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_sharing_category_is_case_insensitive() {
        let repo = SqliteBookRepository::new(memory_pool().await);
        let target = repo.insert(&book("T", None, Some("Fiction, Mystery"))).await.unwrap();
        repo.insert(&book("A", None, Some("MYSTERY, Thriller"))).await.unwrap();
        repo.insert(&book("B", None, Some("Cooking"))).await.unwrap();
        repo.insert(&book("C", None, None)).await.unwrap();

        let tags = vec!["Fiction".to_string(), "Mystery".to_string()];
        let found = repo.find_sharing_category(target, &tags).await.unwrap();
        let titles: Vec<_> = found.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A"]);
    }

    #[tokio::test]
    async fn test_update_unknown_book() {
        let repo = SqliteBookRepository::new(memory_pool().await);
        let err = repo
            .update_price(1, &PriceUpdate::default(), &ChangeThresholds::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    fn price(value: &str) -> PriceUpdate {
        PriceUpdate {
            price: Some(value.parse().unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_price_compares_against_stored_value() {
        let repo = SqliteBookRepository::new(memory_pool().await);
        let id = repo
            .insert(&NewBook {
                price: Some(Decimal::new(499, 2)),
                rating: Some(Decimal::new(40, 1)),
                reviews_count: Some(12),
                ..book("Dune", None, None)
            })
            .await
            .unwrap();
        let thresholds = ChangeThresholds::default();

        let first = repo.update_price(id, &price("9.99"), &thresholds).await.unwrap();
        assert_eq!(first.previous.price, Some(Decimal::new(499, 2)));
        assert_eq!(first.notices[0].message, "Price increase: $4.99 → $9.99");

        // 第二次更新必须以第一次写入的值为基准
        let second = repo.update_price(id, &price("5.99"), &thresholds).await.unwrap();
        assert_eq!(second.previous.price, Some(Decimal::new(999, 2)));
        assert_eq!(second.notices.len(), 1);
        assert_eq!(second.notices[0].message, "Price decrease: $9.99 → $5.99");

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.current_price, Some(Decimal::new(599, 2)));
        assert_eq!(stored.rating, Some(Decimal::new(40, 1)));
        assert_eq!(stored.reviews_count, Some(12));
        assert_eq!(repo.find_price_history(id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_updates_chain_notices() {
        let pool = memory_pool().await;
        let repo = std::sync::Arc::new(SqliteBookRepository::new(pool));
        let id = repo
            .insert(&NewBook {
                price: Some(Decimal::new(499, 2)),
                ..book("Emma", None, None)
            })
            .await
            .unwrap();

        let a = {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.update_price(id, &price("9.99"), &ChangeThresholds::default())
                    .await
            })
        };
        let b = {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.update_price(id, &price("5.99"), &ChangeThresholds::default())
                    .await
            })
        };
        let a = a.await.unwrap().unwrap();
        let b = b.await.unwrap().unwrap();

        // 无论执行顺序如何，后执行者看到的旧值都是先执行者写入的新值
        let (earlier, later) = if b.previous.price == Some(Decimal::new(999, 2)) {
            (a, b)
        } else {
            (b, a)
        };
        assert_eq!(earlier.previous.price, Some(Decimal::new(499, 2)));
        assert_ne!(later.previous.price, Some(Decimal::new(499, 2)));

        let history = repo.find_price_history(id).await.unwrap();
        assert_eq!(history.len(), 3);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_delete() {
        let repo = SqliteBookRepository::new(memory_pool().await);
        let first = repo.insert(&book("First", None, None)).await.unwrap();
        let second = repo.insert(&book("Second", None, None)).await.unwrap();

        let ids: Vec<_> = repo.find_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![second, first]);

        repo.delete(first).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
