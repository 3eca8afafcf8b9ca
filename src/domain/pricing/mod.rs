//! Pricing Context - 基于同类竞品的定价建议
//!
//! 职责:
//! - 汇总竞品价格与评分（缺失值不计入）
//! - 市场均价与当前价加权混合
//! - 评分差异、篇幅差异微调
//! - 无竞品数据时回退到当前价或默认价

mod advisor;
mod policy;

pub use advisor::{PricingAdvisor, PricingAnalysis, PricingSuggestion};
pub use policy::{DefaultPriceTier, PricingPolicy};
