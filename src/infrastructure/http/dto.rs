//! Data Transfer Objects
//!
//! 字段名与前端页面使用的 JSON 保持一致。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::{
    AddBook, BookRecord, NotificationRecord, PriceHistoryRecord, StatsResponse,
    WatchlistBookRecord, WatchlistRecord,
};

// ============================================================================
// 通用响应
// ============================================================================

/// 操作成功
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ============================================================================
// Book DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BookDto {
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
    pub added_date: String,
    pub last_updated: String,
}

impl From<BookRecord> for BookDto {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.id,
            isbn: record.isbn,
            title: record.title,
            author: record.author,
            current_price: record.current_price,
            rating: record.rating,
            reviews_count: record.reviews_count,
            page_count: record.page_count,
            category: record.category,
            publisher: record.publisher,
            published_date: record.published_date,
            description: record.description,
            thumbnail_url: record.thumbnail_url,
            added_date: record.added_at.to_rfc3339(),
            last_updated: record.last_updated.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceHistoryDto {
    pub id: i64,
    pub book_id: i64,
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
    pub snapshot_date: String,
}

impl From<PriceHistoryRecord> for PriceHistoryDto {
    fn from(record: PriceHistoryRecord) -> Self {
        Self {
            id: record.id,
            book_id: record.book_id,
            price: record.price,
            rating: record.rating,
            reviews_count: record.reviews_count,
            snapshot_date: record.snapshot_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BooksResponse<T: Serialize> {
    pub books: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct BookDetailsDto {
    pub book: BookDto,
    pub history: Vec<PriceHistoryDto>,
}

/// 新增图书请求（字段与检索结果一致）
#[derive(Debug, Default, Deserialize)]
pub struct AddBookRequest {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
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

impl From<AddBookRequest> for AddBook {
    fn from(req: AddBookRequest) -> Self {
        AddBook {
            isbn: req.isbn,
            title: req.title.unwrap_or_default(),
            author: req.author.unwrap_or_default(),
            price: req.price,
            rating: req.rating,
            reviews_count: req.reviews_count,
            page_count: req.page_count,
            category: req.category,
            publisher: req.publisher,
            published_date: req.published_date,
            description: req.description,
            thumbnail_url: req.thumbnail_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddBookResponse {
    pub success: bool,
    pub book_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceRequest {
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePriceResponseDto {
    pub success: bool,
    pub notifications: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchBookRequest {
    #[serde(default)]
    pub query: String,
}

/// 汇总统计；没有数据时平均值为 0
#[derive(Debug, Serialize)]
pub struct StatsDto {
    pub total_books: usize,
    pub avg_price: Decimal,
    pub avg_rating: Decimal,
    pub unread_notifications: i64,
}

impl From<StatsResponse> for StatsDto {
    fn from(stats: StatsResponse) -> Self {
        Self {
            total_books: stats.total_books,
            avg_price: stats.avg_price.unwrap_or_default(),
            avg_rating: stats.avg_rating.unwrap_or_default(),
            unread_notifications: stats.unread_notifications,
        }
    }
}

// ============================================================================
// Pricing DTOs
// ============================================================================

/// 利润计算请求
///
/// 各字段在边界处统一校验，缺失的 format / price 返回 400。
#[derive(Debug, Deserialize)]
pub struct ProfitCalculatorRequest {
    pub format: Option<String>,
    pub price: Option<Decimal>,
    pub file_size: Option<Decimal>,
    pub printing_cost: Option<Decimal>,
}

// ============================================================================
// Watchlist DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct WatchlistDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_date: String,
    pub book_count: i64,
}

impl From<WatchlistRecord> for WatchlistDto {
    fn from(record: WatchlistRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            created_date: record.created_at.to_rfc3339(),
            book_count: record.book_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WatchlistsResponse {
    pub watchlists: Vec<WatchlistDto>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistBookDto {
    #[serde(flatten)]
    pub book: BookDto,
    pub watchlist_added_date: String,
}

impl From<WatchlistBookRecord> for WatchlistBookDto {
    fn from(record: WatchlistBookRecord) -> Self {
        Self {
            book: BookDto::from(record.book),
            watchlist_added_date: record.added_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWatchlistRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateWatchlistResponse {
    pub success: bool,
    pub watchlist_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct WatchlistAddBookRequest {
    pub book_id: Option<i64>,
}

// ============================================================================
// Notification DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct NotificationDto {
    pub id: i64,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_date: String,
}

impl From<NotificationRecord> for NotificationDto {
    fn from(record: NotificationRecord) -> Self {
        Self {
            id: record.id,
            book_id: record.book_id,
            title: record.book_title,
            author: record.book_author,
            message: record.message,
            notification_type: record.notification_type,
            is_read: record.is_read,
            created_date: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationDto>,
}
