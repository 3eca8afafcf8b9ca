//! Royalty Context - 版税政策表
//!
//! 所有比例与常量都来自配置，`Default` 仅提供常见市场的参考值。

use rust_decimal::Decimal;

use super::SaleFormat;

/// 推荐区间规则：上限 = min(下限 × multiplier, ceiling)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRule {
    pub multiplier: Decimal,
    pub ceiling: Decimal,
}

impl RangeRule {
    pub fn new(multiplier: Decimal, ceiling: Decimal) -> Self {
        Self {
            multiplier,
            ceiling,
        }
    }
}

/// 版税政策
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoyaltyPolicy {
    /// 电子书标准价格带下限（含）
    pub ebook_standard_min: Decimal,
    /// 电子书标准价格带上限（含）
    pub ebook_standard_max: Decimal,
    /// 标准价格带内的版税率
    pub ebook_standard_rate: Decimal,
    /// 标准价格带外的版税率
    pub ebook_reduced_rate: Decimal,
    /// 每 MB 传输费（仅标准价格带收取）
    pub delivery_cost_per_mb: Decimal,
    pub paperback_rate: Decimal,
    pub hardcover_rate: Decimal,
    pub ebook_range: RangeRule,
    pub paperback_range: RangeRule,
    pub hardcover_range: RangeRule,
}

impl Default for RoyaltyPolicy {
    fn default() -> Self {
        Self {
            ebook_standard_min: Decimal::new(299, 2),
            ebook_standard_max: Decimal::new(999, 2),
            ebook_standard_rate: Decimal::new(70, 2),
            ebook_reduced_rate: Decimal::new(35, 2),
            delivery_cost_per_mb: Decimal::new(15, 2),
            paperback_rate: Decimal::new(60, 2),
            hardcover_rate: Decimal::new(55, 2),
            ebook_range: RangeRule::new(Decimal::from(3), Decimal::new(999, 2)),
            paperback_range: RangeRule::new(Decimal::from(3), Decimal::new(4999, 2)),
            hardcover_range: RangeRule::new(Decimal::from(4), Decimal::new(7999, 2)),
        }
    }
}

impl RoyaltyPolicy {
    /// 价格是否落在电子书标准价格带内
    pub fn in_standard_band(&self, list_price: Decimal) -> bool {
        list_price >= self.ebook_standard_min && list_price <= self.ebook_standard_max
    }

    /// 给定形态与价格下适用的版税率
    pub fn rate_for(&self, format: SaleFormat, list_price: Decimal) -> Decimal {
        match format {
            SaleFormat::Ebook if self.in_standard_band(list_price) => self.ebook_standard_rate,
            SaleFormat::Ebook => self.ebook_reduced_rate,
            SaleFormat::Paperback => self.paperback_rate,
            SaleFormat::Hardcover => self.hardcover_rate,
        }
    }

    pub fn range_rule(&self, format: SaleFormat) -> &RangeRule {
        match format {
            SaleFormat::Ebook => &self.ebook_range,
            SaleFormat::Paperback => &self.paperback_range,
            SaleFormat::Hardcover => &self.hardcover_range,
        }
    }

    /// 校验政策取值
    pub fn validate(&self) -> Result<(), String> {
        let rates = [
            ("ebook_standard_rate", self.ebook_standard_rate),
            ("ebook_reduced_rate", self.ebook_reduced_rate),
            ("paperback_rate", self.paperback_rate),
            ("hardcover_rate", self.hardcover_rate),
        ];
        for (name, rate) in rates {
            if rate <= Decimal::ZERO || rate > Decimal::ONE {
                return Err(format!("royalty.{} must be within (0, 1], got {}", name, rate));
            }
        }

        if self.ebook_standard_min < Decimal::ZERO
            || self.ebook_standard_min > self.ebook_standard_max
        {
            return Err(format!(
                "royalty ebook standard band is invalid: {} - {}",
                self.ebook_standard_min, self.ebook_standard_max
            ));
        }

        if self.delivery_cost_per_mb < Decimal::ZERO {
            return Err("royalty.delivery_cost_per_mb cannot be negative".to_string());
        }

        for format in [SaleFormat::Ebook, SaleFormat::Paperback, SaleFormat::Hardcover] {
            let rule = self.range_rule(format);
            if rule.multiplier < Decimal::ONE {
                return Err(format!("royalty {} range multiplier must be >= 1", format));
            }
            if rule.ceiling <= Decimal::ZERO {
                return Err(format!("royalty {} range ceiling must be positive", format));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(RoyaltyPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        let policy = RoyaltyPolicy::default();
        assert!(policy.in_standard_band(Decimal::new(299, 2)));
        assert!(policy.in_standard_band(Decimal::new(999, 2)));
        assert!(!policy.in_standard_band(Decimal::new(298, 2)));
        assert!(!policy.in_standard_band(Decimal::new(1000, 2)));
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let policy = RoyaltyPolicy {
            paperback_rate: Decimal::new(12, 1),
            ..RoyaltyPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let policy = RoyaltyPolicy {
            ebook_standard_min: Decimal::from(10),
            ebook_standard_max: Decimal::from(5),
            ..RoyaltyPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
