//! Pricing Queries

use crate::domain::RoyaltyInput;

/// 获取定价建议
#[derive(Debug, Clone)]
pub struct GetPricingSuggestion {
    pub book_id: i64,
}

/// 计算单本利润
#[derive(Debug, Clone)]
pub struct CalculateProfit {
    pub input: RoyaltyInput,
}
