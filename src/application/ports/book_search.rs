//! Book Search Port - 外部图书目录检索
//!
//! 具体实现在 infrastructure/adapters 层（Google Books）

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// 检索错误
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 检索结果（字段与新增图书请求一致，便于直接加入追踪）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSearchResult {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
    pub page_count: Option<i64>,
    pub category: String,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: String,
    pub thumbnail_url: Option<String>,
}

/// Book Search Port
#[async_trait]
pub trait BookSearchPort: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<BookSearchResult>, SearchError>;
}
