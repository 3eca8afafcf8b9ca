//! Book Queries

/// 获取图书详情（含价格历史）
#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: i64,
}

/// 列出所有图书
#[derive(Debug, Clone)]
pub struct ListBooks;

/// 汇总统计
#[derive(Debug, Clone)]
pub struct GetStats;

/// 外部目录检索
#[derive(Debug, Clone)]
pub struct SearchBooks {
    pub query: String,
}
