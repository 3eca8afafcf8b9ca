//! Book Command Handlers

use rust_decimal::Decimal;
use std::sync::Arc;

use crate::application::commands::{AddBook, DeleteBook, UpdatePrice};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, NewBook, PriceUpdate, RepositoryError};
use crate::domain::book::ChangeThresholds;

const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

fn validate_price(field: &str, price: Option<Decimal>) -> Result<(), ApplicationError> {
    match price {
        Some(p) if p < Decimal::ZERO => Err(ApplicationError::validation(format!(
            "{} must not be negative",
            field
        ))),
        _ => Ok(()),
    }
}

fn validate_rating(rating: Option<Decimal>) -> Result<(), ApplicationError> {
    match rating {
        Some(r) if r < Decimal::ZERO || r > MAX_RATING => Err(ApplicationError::validation(
            "rating must be between 0 and 5",
        )),
        _ => Ok(()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// AddBook
// ============================================================================

/// AddBook Handler
pub struct AddBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl AddBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    /// 新增图书，返回图书 ID
    pub async fn handle(&self, command: AddBook) -> Result<i64, ApplicationError> {
        let title = command.title.trim().to_string();
        let author = command.author.trim().to_string();
        if title.is_empty() {
            return Err(ApplicationError::validation("title is required"));
        }
        if author.is_empty() {
            return Err(ApplicationError::validation("author is required"));
        }
        validate_price("price", command.price)?;
        validate_rating(command.rating)?;

        let book = NewBook {
            isbn: non_empty(command.isbn),
            title,
            author,
            price: command.price,
            rating: command.rating,
            reviews_count: command.reviews_count,
            page_count: command.page_count,
            category: non_empty(command.category),
            publisher: non_empty(command.publisher),
            published_date: non_empty(command.published_date),
            description: command.description,
            thumbnail_url: non_empty(command.thumbnail_url),
        };

        let book_id = self.book_repo.insert(&book).await?;

        tracing::info!(
            book_id = book_id,
            title = %book.title,
            price = ?book.price,
            "Book added"
        );

        Ok(book_id)
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", command.book_id))?;

        self.book_repo.delete(command.book_id).await?;

        tracing::info!(book_id = book.id, title = %book.title, "Book deleted");

        Ok(())
    }
}

// ============================================================================
// UpdatePrice
// ============================================================================

/// 更新价格响应
#[derive(Debug, Clone)]
pub struct UpdatePriceResponse {
    pub book_id: i64,
    /// 本次生成的通知文本
    pub notifications: Vec<String>,
}

/// UpdatePrice Handler - 写入新价格、追加历史快照、生成变动通知
pub struct UpdatePriceHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    thresholds: ChangeThresholds,
}

impl UpdatePriceHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, thresholds: ChangeThresholds) -> Self {
        Self {
            book_repo,
            thresholds,
        }
    }

    pub async fn handle(&self, command: UpdatePrice) -> Result<UpdatePriceResponse, ApplicationError> {
        validate_price("price", Some(command.price))?;
        validate_rating(command.rating)?;

        let update = PriceUpdate {
            price: Some(command.price),
            rating: command.rating,
            reviews_count: command.reviews_count,
        };

        // 读取现值、检测变动与写入在仓储的同一事务内完成
        let change = self
            .book_repo
            .update_price(command.book_id, &update, &self.thresholds)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) => ApplicationError::not_found("Book", command.book_id),
                other => other.into(),
            })?;

        tracing::info!(
            book_id = command.book_id,
            old_price = ?change.previous.price,
            new_price = %command.price,
            notifications = change.notices.len(),
            "Book price updated"
        );

        Ok(UpdatePriceResponse {
            book_id: command.book_id,
            notifications: change.notices.into_iter().map(|n| n.message).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{memory_pool, SqliteBookRepository};

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    async fn repo() -> Arc<dyn BookRepositoryPort> {
        Arc::new(SqliteBookRepository::new(memory_pool().await))
    }

    fn add_command(title: &str, price: Option<&str>) -> AddBook {
        AddBook {
            isbn: Some(format!("isbn-{}", title)),
            title: title.to_string(),
            author: "Author".to_string(),
            price: price.map(dec),
            rating: Some(dec("4.0")),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_book_requires_title() {
        let handler = AddBookHandler::new(repo().await);
        let err = handler.handle(add_command("  ", None)).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_add_book_duplicate_isbn_conflicts() {
        let handler = AddBookHandler::new(repo().await);
        handler.handle(add_command("Dune", Some("9.99"))).await.unwrap();
        let err = handler.handle(add_command("Dune", Some("9.99"))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_price_creates_notifications() {
        let repo = repo().await;
        let book_id = AddBookHandler::new(repo.clone())
            .handle(add_command("Dune", Some("4.99")))
            .await
            .unwrap();

        let handler = UpdatePriceHandler::new(repo.clone(), ChangeThresholds::default());
        let response = handler
            .handle(UpdatePrice {
                book_id,
                price: dec("5.99"),
                rating: Some(dec("4.5")),
                reviews_count: None,
            })
            .await
            .unwrap();

        assert_eq!(
            response.notifications,
            vec![
                "Price increase: $4.99 → $5.99".to_string(),
                "Rating increased: 4.0 → 4.5".to_string()
            ]
        );

        let book = repo.find_by_id(book_id).await.unwrap().unwrap();
        assert_eq!(book.current_price, Some(dec("5.99")));

        let history = repo.find_price_history(book_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].price, Some(dec("5.99")));
    }

    #[tokio::test]
    async fn test_update_price_keeps_rating_when_absent() {
        let repo = repo().await;
        let book_id = AddBookHandler::new(repo.clone())
            .handle(add_command("Emma", Some("3.99")))
            .await
            .unwrap();

        UpdatePriceHandler::new(repo.clone(), ChangeThresholds::default())
            .handle(UpdatePrice {
                book_id,
                price: dec("4.19"),
                rating: None,
                reviews_count: None,
            })
            .await
            .unwrap();

        let book = repo.find_by_id(book_id).await.unwrap().unwrap();
        assert_eq!(book.rating, Some(dec("4.0")));
    }

    #[tokio::test]
    async fn test_update_unknown_book_is_not_found() {
        let handler = UpdatePriceHandler::new(repo().await, ChangeThresholds::default());
        let err = handler
            .handle(UpdatePrice {
                book_id: 42,
                price: dec("1.00"),
                rating: None,
                reviews_count: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn test_delete_book() {
        let repo = repo().await;
        let book_id = AddBookHandler::new(repo.clone())
            .handle(add_command("Ulysses", None))
            .await
            .unwrap();

        let handler = DeleteBookHandler::new(repo.clone());
        handler.handle(DeleteBook { book_id }).await.unwrap();
        assert!(repo.find_by_id(book_id).await.unwrap().is_none());

        let err = handler.handle(DeleteBook { book_id }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
