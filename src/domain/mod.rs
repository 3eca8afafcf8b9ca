//! Domain Layer - 领域层
//!
//! 纯业务规则，无 IO：
//! - Royalty Context: 版税与单本利润
//! - Pricing Context: 基于竞品的定价建议
//! - Book Context: 图书摘要与变动检测

pub mod book;
pub mod money;
pub mod pricing;
pub mod royalty;

pub use book::BookSummary;
pub use pricing::{PricingAdvisor, PricingPolicy, PricingSuggestion};
pub use royalty::{RoyaltyCalculator, RoyaltyError, RoyaltyInput, RoyaltyPolicy, RoyaltyResult, SaleFormat};
