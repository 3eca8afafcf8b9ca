//! Royalty Context - 版税与单本利润计算
//!
//! 职责:
//! - 按销售形态（电子书 / 平装 / 精装）确定版税率
//! - 计算单本利润与盈亏平衡价
//! - 给出推荐定价区间及说明

mod calculator;
mod errors;
mod policy;
mod value_objects;

pub use calculator::RoyaltyCalculator;
pub use errors::RoyaltyError;
pub use policy::{RangeRule, RoyaltyPolicy};
pub use value_objects::{RecommendedRange, RoyaltyInput, RoyaltyResult, SaleFormat};
