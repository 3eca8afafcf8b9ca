//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                                       GET     健康检查
//! - /api/profit-calculator                          POST    单本利润计算
//! - /api/pricing-suggestion/:book_id                GET     定价建议
//! - /api/books                                      GET     列出图书
//! - /api/add-book                                   POST    新增图书
//! - /api/book/:book_id                              GET     图书详情（含价格历史）
//! - /api/book/:book_id                              DELETE  删除图书
//! - /api/update-price/:book_id                      POST    更新价格
//! - /api/search-book                                POST    外部目录检索
//! - /api/stats                                      GET     汇总统计
//! - /api/watchlists                                 GET     列出清单
//! - /api/watchlist                                  POST    创建清单
//! - /api/watchlist/:id                              DELETE  删除清单
//! - /api/watchlist/:id/books                        GET     清单内图书
//! - /api/watchlist/:id/add-book                     POST    加入图书
//! - /api/watchlist/:id/remove-book/:book_id         DELETE  移出图书
//! - /api/notifications                              GET     最近通知
//! - /api/notifications/:id/read                     POST    标记已读

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/stats", get(handlers::get_stats))
        .route("/search-book", post(handlers::search_book))
        .merge(book_routes())
        .merge(pricing_routes())
        .merge(watchlist_routes())
        .merge(notification_routes())
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(handlers::list_books))
        .route("/add-book", post(handlers::add_book))
        .route(
            "/book/:book_id",
            get(handlers::get_book).delete(handlers::delete_book),
        )
        .route("/update-price/:book_id", post(handlers::update_price))
}

/// Pricing 路由
fn pricing_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profit-calculator", post(handlers::profit_calculator))
        .route(
            "/pricing-suggestion/:book_id",
            get(handlers::pricing_suggestion),
        )
}

/// Watchlist 路由
fn watchlist_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/watchlists", get(handlers::list_watchlists))
        .route("/watchlist", post(handlers::create_watchlist))
        .route("/watchlist/:id", delete(handlers::delete_watchlist))
        .route("/watchlist/:id/books", get(handlers::get_watchlist_books))
        .route("/watchlist/:id/add-book", post(handlers::add_book_to_watchlist))
        .route(
            "/watchlist/:id/remove-book/:book_id",
            delete(handlers::remove_book_from_watchlist),
        )
}

/// Notification 路由
fn notification_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(handlers::list_notifications))
        .route(
            "/notifications/:id/read",
            post(handlers::mark_notification_read),
        )
}
