//! Book Context - 价格/评分变动检测

use rust_decimal::Decimal;

use crate::domain::money::{format_usd, round_rating};

/// 某一时刻的价格与评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceSnapshot {
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
}

/// 触发通知的阈值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeThresholds {
    /// 价格变动超过该值（严格大于）时通知
    pub price_delta: Decimal,
    /// 评分变动达到该值（大于等于）时通知
    pub rating_delta: Decimal,
}

impl Default for ChangeThresholds {
    fn default() -> Self {
        Self {
            price_delta: Decimal::new(50, 2),
            rating_delta: Decimal::new(3, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    PriceChange,
    RatingChange,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::PriceChange => "price_change",
            ChangeKind::RatingChange => "rating_change",
        }
    }
}

/// 变动通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub kind: ChangeKind,
    pub message: String,
}

/// 比较前后两次快照，返回需要通知的变动
///
/// 任一侧缺失时不比较该项。
pub fn detect_changes(
    previous: &PriceSnapshot,
    next: &PriceSnapshot,
    thresholds: &ChangeThresholds,
) -> Vec<ChangeNotice> {
    let mut notices = Vec::new();

    if let (Some(old), Some(new)) = (previous.price, next.price) {
        if (old - new).abs() > thresholds.price_delta {
            let direction = if new > old { "increase" } else { "decrease" };
            notices.push(ChangeNotice {
                kind: ChangeKind::PriceChange,
                message: format!("Price {}: {} → {}", direction, format_usd(old), format_usd(new)),
            });
        }
    }

    if let (Some(old), Some(new)) = (previous.rating, next.rating) {
        if (old - new).abs() >= thresholds.rating_delta {
            let direction = if new > old { "increased" } else { "decreased" };
            notices.push(ChangeNotice {
                kind: ChangeKind::RatingChange,
                message: format!(
                    "Rating {}: {:.1} → {:.1}",
                    direction,
                    round_rating(old),
                    round_rating(new)
                ),
            });
        }
    }

    notices
}
