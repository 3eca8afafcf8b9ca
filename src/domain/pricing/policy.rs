//! Pricing Context - 定价建议参数

use rust_decimal::Decimal;

/// 无竞品数据时按篇幅选择的默认价格档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPriceTier {
    /// 篇幅严格大于该页数时适用
    pub min_pages: i64,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    /// 市场均价权重，其余为当前价权重
    pub market_weight: Decimal,
    /// 评分差异阈值
    pub rating_threshold: Decimal,
    /// 评分高于竞品时的上调比例
    pub rating_premium: Decimal,
    /// 评分低于竞品时的下调比例
    pub rating_discount: Decimal,
    /// 篇幅超过竞品均值该倍数时上调
    pub long_page_ratio: Decimal,
    pub long_page_premium: Decimal,
    /// 篇幅低于竞品均值该倍数时下调
    pub short_page_ratio: Decimal,
    pub short_page_discount: Decimal,
    /// 建议价上下浮动比例
    pub band: Decimal,
    /// 回退路径的浮动比例
    pub fallback_band: Decimal,
    /// 价格下限
    pub price_floor: Decimal,
    /// 默认价格（无篇幅信息或篇幅较短）
    pub default_price: Decimal,
    /// 按篇幅递增的默认价格档
    pub default_price_tiers: Vec<DefaultPriceTier>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            market_weight: Decimal::new(60, 2),
            rating_threshold: Decimal::new(5, 1),
            rating_premium: Decimal::new(15, 2),
            rating_discount: Decimal::new(10, 2),
            long_page_ratio: Decimal::new(13, 1),
            long_page_premium: Decimal::new(10, 2),
            short_page_ratio: Decimal::new(7, 1),
            short_page_discount: Decimal::new(5, 2),
            band: Decimal::new(15, 2),
            fallback_band: Decimal::new(20, 2),
            price_floor: Decimal::new(99, 2),
            default_price: Decimal::new(299, 2),
            default_price_tiers: vec![
                DefaultPriceTier {
                    min_pages: 300,
                    price: Decimal::new(499, 2),
                },
                DefaultPriceTier {
                    min_pages: 500,
                    price: Decimal::new(999, 2),
                },
            ],
        }
    }
}

impl PricingPolicy {
    /// 按篇幅选取默认价格
    pub fn default_price_for(&self, page_count: Option<i64>) -> Decimal {
        let Some(pages) = page_count else {
            return self.default_price;
        };

        self.default_price_tiers
            .iter()
            .filter(|tier| pages > tier.min_pages)
            .max_by_key(|tier| tier.min_pages)
            .map(|tier| tier.price)
            .unwrap_or(self.default_price)
    }

    pub fn validate(&self) -> Result<(), String> {
        let fractions = [
            ("rating_premium", self.rating_premium),
            ("rating_discount", self.rating_discount),
            ("long_page_premium", self.long_page_premium),
            ("short_page_discount", self.short_page_discount),
            ("band", self.band),
            ("fallback_band", self.fallback_band),
        ];
        for (name, value) in fractions {
            if value < Decimal::ZERO || value >= Decimal::ONE {
                return Err(format!("pricing.{} must be within [0, 1), got {}", name, value));
            }
        }
        if self.market_weight < Decimal::ZERO || self.market_weight > Decimal::ONE {
            return Err(format!(
                "pricing.market_weight must be within [0, 1], got {}",
                self.market_weight
            ));
        }

        if self.rating_threshold < Decimal::ZERO {
            return Err("pricing.rating_threshold cannot be negative".to_string());
        }

        if self.short_page_ratio > self.long_page_ratio {
            return Err("pricing.short_page_ratio cannot exceed long_page_ratio".to_string());
        }

        if self.price_floor <= Decimal::ZERO {
            return Err("pricing.price_floor must be positive".to_string());
        }

        if self.default_price <= Decimal::ZERO
            || self.default_price_tiers.iter().any(|t| t.price <= Decimal::ZERO)
        {
            return Err("pricing default prices must be positive".to_string());
        }

        Ok(())
    }
}
