//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::book::{BookSummary, ChangeNotice, ChangeThresholds, PriceSnapshot};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Book Repository
// ============================================================================

/// 图书实体（用于持久化）
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub id: i64,
    pub isbn: Option<String>,
    pub title: String,
    pub author: String,
    pub current_price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
    pub page_count: Option<i64>,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub added_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl BookRecord {
    /// 转为定价建议使用的领域摘要
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.current_price,
            rating: self.rating,
            reviews_count: self.reviews_count,
            page_count: self.page_count,
            category: self.category.clone(),
            publisher: self.publisher.clone(),
            published_date: self.published_date.clone(),
            description: self.description.clone(),
        }
    }
}

/// 新增图书
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub isbn: Option<String>,
    pub title: String,
    pub author: String,
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
    pub page_count: Option<i64>,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// 价格历史快照
#[derive(Debug, Clone)]
pub struct PriceHistoryRecord {
    pub id: i64,
    pub book_id: i64,
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
    pub snapshot_at: DateTime<Utc>,
}

/// 价格更新（写入图书当前值并追加历史快照）
///
/// `rating` / `reviews_count` 为 None 时保留库中现值。
#[derive(Debug, Clone, Default)]
pub struct PriceUpdate {
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
}

/// 价格更新结果：更新前的快照与已写入的变动通知
#[derive(Debug, Clone)]
pub struct PriceChange {
    pub previous: PriceSnapshot,
    pub notices: Vec<ChangeNotice>,
}

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 新增图书，带价格时同时写入首条价格快照；ISBN 重复返回 Duplicate
    async fn insert(&self, book: &NewBook) -> Result<i64, RepositoryError>;

    /// 根据 ID 查找图书
    async fn find_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepositoryError>;

    /// 获取所有图书（最新添加在前）
    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 获取与给定标签至少共享一个分类的其他图书（不含 exclude_id）
    async fn find_sharing_category(
        &self,
        exclude_id: i64,
        tags: &[String],
    ) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 删除图书（级联删除历史、通知、清单关联）
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// 获取价格历史（按时间升序）
    async fn find_price_history(&self, book_id: i64) -> Result<Vec<PriceHistoryRecord>, RepositoryError>;

    /// 更新价格：在同一事务内读取现值、检测变动、写入当前值、追加快照与通知
    ///
    /// 图书不存在返回 NotFound。
    async fn update_price(
        &self,
        book_id: i64,
        update: &PriceUpdate,
        thresholds: &ChangeThresholds,
    ) -> Result<PriceChange, RepositoryError>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// 通知实体（附带图书标题/作者）
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    pub id: i64,
    pub book_id: i64,
    pub book_title: String,
    pub book_author: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification Repository Port
#[async_trait]
pub trait NotificationRepositoryPort: Send + Sync {
    /// 最近的通知（新的在前）
    async fn find_recent(&self, limit: usize) -> Result<Vec<NotificationRecord>, RepositoryError>;

    /// 标记已读，返回是否存在该通知
    async fn mark_read(&self, id: i64) -> Result<bool, RepositoryError>;

    /// 未读数量
    async fn count_unread(&self) -> Result<i64, RepositoryError>;
}

// ============================================================================
// Watchlist Repository
// ============================================================================

/// 关注清单实体
#[derive(Debug, Clone)]
pub struct WatchlistRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub book_count: i64,
}

/// 清单中的图书
#[derive(Debug, Clone)]
pub struct WatchlistBookRecord {
    pub book: BookRecord,
    pub added_at: DateTime<Utc>,
}

/// Watchlist Repository Port
#[async_trait]
pub trait WatchlistRepositoryPort: Send + Sync {
    /// 创建清单；名称重复返回 Duplicate
    async fn create(&self, name: &str, description: Option<&str>) -> Result<i64, RepositoryError>;

    /// 获取所有清单（含图书数量，新的在前）
    async fn find_all(&self) -> Result<Vec<WatchlistRecord>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<WatchlistRecord>, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// 加入图书；已存在返回 Duplicate
    async fn add_book(&self, watchlist_id: i64, book_id: i64) -> Result<(), RepositoryError>;

    async fn remove_book(&self, watchlist_id: i64, book_id: i64) -> Result<(), RepositoryError>;

    /// 清单内图书（最近加入在前）
    async fn find_books(&self, watchlist_id: i64) -> Result<Vec<WatchlistBookRecord>, RepositoryError>;
}
