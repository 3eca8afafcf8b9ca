//! Book Commands

use rust_decimal::Decimal;

/// 新增追踪图书命令
#[derive(Debug, Clone, Default)]
pub struct AddBook {
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

/// 删除图书命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: i64,
}

/// 更新价格命令（也用于应用建议价）
///
/// rating / reviews_count 为空时保留原值。
#[derive(Debug, Clone)]
pub struct UpdatePrice {
    pub book_id: i64,
    pub price: Decimal,
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
}
