//! Book Query Handlers

use rust_decimal::Decimal;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRecord, BookRepositoryPort, BookSearchPort, BookSearchResult, NotificationRepositoryPort,
    PriceHistoryRecord,
};
use crate::application::queries::{GetBook, GetStats, ListBooks, SearchBooks};
use crate::domain::money::{mean_of_present, round_money};

// ============================================================================
// Response DTOs
// ============================================================================

/// 图书详情响应
#[derive(Debug, Clone)]
pub struct BookDetailsResponse {
    pub book: BookRecord,
    /// 按时间升序
    pub price_history: Vec<PriceHistoryRecord>,
}

/// 统计响应
#[derive(Debug, Clone, PartialEq)]
pub struct StatsResponse {
    pub total_books: usize,
    pub avg_price: Option<Decimal>,
    pub avg_rating: Option<Decimal>,
    pub unread_notifications: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetBook Handler
pub struct GetBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, query: GetBook) -> Result<BookDetailsResponse, ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let price_history = self.book_repo.find_price_history(query.book_id).await?;

        Ok(BookDetailsResponse {
            book,
            price_history,
        })
    }
}

/// ListBooks Handler
pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl ListBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<BookRecord>, ApplicationError> {
        Ok(self.book_repo.find_all().await?)
    }
}

/// GetStats Handler
pub struct GetStatsHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    notification_repo: Arc<dyn NotificationRepositoryPort>,
}

impl GetStatsHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        notification_repo: Arc<dyn NotificationRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            notification_repo,
        }
    }

    pub async fn handle(&self, _query: GetStats) -> Result<StatsResponse, ApplicationError> {
        let books = self.book_repo.find_all().await?;
        let unread_notifications = self.notification_repo.count_unread().await?;

        Ok(StatsResponse {
            total_books: books.len(),
            avg_price: mean_of_present(books.iter().map(|b| b.current_price)).map(round_money),
            avg_rating: mean_of_present(books.iter().map(|b| b.rating)).map(round_money),
            unread_notifications,
        })
    }
}

/// SearchBooks Handler - 转发到外部目录
pub struct SearchBooksHandler {
    search: Arc<dyn BookSearchPort>,
    max_results: u32,
}

impl SearchBooksHandler {
    pub fn new(search: Arc<dyn BookSearchPort>, max_results: u32) -> Self {
        Self {
            search,
            max_results,
        }
    }

    pub async fn handle(&self, query: SearchBooks) -> Result<Vec<BookSearchResult>, ApplicationError> {
        let text = query.query.trim();
        if text.is_empty() {
            return Err(ApplicationError::validation("query is required"));
        }

        let results = self.search.search(text, self.max_results).await?;

        tracing::info!(query = %text, results = results.len(), "Book search completed");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NewBook, PriceUpdate, SearchError};
    use crate::domain::book::ChangeThresholds;
    use crate::infrastructure::persistence::sqlite::{
        memory_pool, SqliteBookRepository, SqliteNotificationRepository,
    };
    use async_trait::async_trait;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn new_book(title: &str, price: Option<&str>, rating: Option<&str>) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Author".to_string(),
            price: price.map(dec),
            rating: rating.map(dec),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_stats_skip_missing_values() {
        let pool = memory_pool().await;
        let books = Arc::new(SqliteBookRepository::new(pool.clone()));
        let notifications = Arc::new(SqliteNotificationRepository::new(pool));

        books.insert(&new_book("A", Some("10.00"), Some("4.0"))).await.unwrap();
        books.insert(&new_book("B", Some("5.00"), None)).await.unwrap();
        books.insert(&new_book("C", None, Some("4.5"))).await.unwrap();

        let stats = GetStatsHandler::new(books, notifications)
            .handle(GetStats)
            .await
            .unwrap();

        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.avg_price, Some(dec("7.50")));
        assert_eq!(stats.avg_rating, Some(dec("4.25")));
        assert_eq!(stats.unread_notifications, 0);
    }

    #[tokio::test]
    async fn test_stats_empty_store() {
        let pool = memory_pool().await;
        let stats = GetStatsHandler::new(
            Arc::new(SqliteBookRepository::new(pool.clone())),
            Arc::new(SqliteNotificationRepository::new(pool)),
        )
        .handle(GetStats)
        .await
        .unwrap();

        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.avg_price, None);
        assert_eq!(stats.avg_rating, None);
    }

    #[tokio::test]
    async fn test_get_book_includes_history() {
        let repo = Arc::new(SqliteBookRepository::new(memory_pool().await));
        let id = repo.insert(&new_book("A", Some("3.99"), None)).await.unwrap();
        repo.update_price(
            id,
            &PriceUpdate {
                price: Some(dec("4.99")),
                ..Default::default()
            },
            &ChangeThresholds::default(),
        )
        .await
        .unwrap();

        let details = GetBookHandler::new(repo).handle(GetBook { book_id: id }).await.unwrap();
        let prices: Vec<_> = details.price_history.iter().map(|h| h.price).collect();
        assert_eq!(prices, vec![Some(dec("3.99")), Some(dec("4.99"))]);
    }

    struct FailingSearch;

    #[async_trait]
    impl BookSearchPort for FailingSearch {
        async fn search(&self, _query: &str, _max: u32) -> Result<Vec<BookSearchResult>, SearchError> {
            Err(SearchError::Timeout)
        }
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let handler = SearchBooksHandler::new(Arc::new(FailingSearch), 10);
        let err = handler
            .handle(SearchBooks {
                query: "   ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_search_failure_is_external_error() {
        let handler = SearchBooksHandler::new(Arc::new(FailingSearch), 10);
        let err = handler
            .handle(SearchBooks {
                query: "dune".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }
}
