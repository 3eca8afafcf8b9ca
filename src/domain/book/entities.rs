//! Book Context - Entities

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 图书摘要
///
/// 定价建议只读使用；持久化由图书仓储负责。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: Option<Decimal>,
    /// 0 - 5
    pub rating: Option<Decimal>,
    pub reviews_count: Option<i64>,
    pub page_count: Option<i64>,
    /// 逗号分隔的分类标签
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
}

impl BookSummary {
    /// 分类标签（去空白、去空项）
    pub fn category_tags(&self) -> Vec<String> {
        self.category
            .as_deref()
            .map(parse_category_tags)
            .unwrap_or_default()
    }

    /// 是否与另一本书至少共享一个分类标签（忽略大小写）
    pub fn shares_category_with(&self, other: &BookSummary) -> bool {
        let own = self.category_tags();
        other
            .category_tags()
            .iter()
            .any(|tag| own.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }
}

/// 解析逗号分隔的分类字段
pub fn parse_category_tags(category: &str) -> Vec<String> {
    category
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
