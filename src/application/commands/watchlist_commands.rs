//! Watchlist Commands

/// 创建关注清单命令
#[derive(Debug, Clone)]
pub struct CreateWatchlist {
    pub name: String,
    pub description: Option<String>,
}

/// 删除关注清单命令
#[derive(Debug, Clone)]
pub struct DeleteWatchlist {
    pub watchlist_id: i64,
}

/// 加入图书命令
#[derive(Debug, Clone)]
pub struct AddBookToWatchlist {
    pub watchlist_id: i64,
    pub book_id: i64,
}

/// 移出图书命令
#[derive(Debug, Clone)]
pub struct RemoveBookFromWatchlist {
    pub watchlist_id: i64,
    pub book_id: i64,
}
