//! Watchlist Queries

/// 列出所有关注清单
#[derive(Debug, Clone)]
pub struct ListWatchlists;

/// 获取清单内图书
#[derive(Debug, Clone)]
pub struct GetWatchlistBooks {
    pub watchlist_id: i64,
}
