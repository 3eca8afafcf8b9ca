//! 金额与评分的取整工具
//!
//! 领域内所有金额、评分、比例均使用 `Decimal`，取整统一为四舍五入（half-up）。

use rust_decimal::{Decimal, RoundingStrategy};

/// 金额保留 2 位小数（四舍五入）
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// 评分保留 1 位小数
pub fn round_rating(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// 比例转换为百分比并保留 1 位小数（0.7 -> 70.0）
pub fn to_percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// 向上取整到分（3.001 -> 3.01）
pub fn ceil_to_cent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::AwayFromZero)
}

/// 对存在的值求平均，缺失值既不计入总和也不计入分母
pub fn mean_of_present<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((Decimal::ZERO, 0u32), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}

/// 格式化为美元金额文本
pub fn format_usd(value: Decimal) -> String {
    format!("${:.2}", round_money(value))
}
