//! Royalty Context - 单本利润计算

use rust_decimal::Decimal;

use super::value_objects::CostBasis;
use super::{RecommendedRange, RoyaltyError, RoyaltyInput, RoyaltyPolicy, RoyaltyResult, SaleFormat};
use crate::domain::money::{ceil_to_cent, format_usd, round_money, to_percent};

/// 推荐区间下限的最小值（一分钱）
const MIN_RECOMMENDED_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// 版税计算器
///
/// 纯函数式：不持有跨调用状态，可并发调用。
#[derive(Debug, Clone, Default)]
pub struct RoyaltyCalculator {
    policy: RoyaltyPolicy,
}

impl RoyaltyCalculator {
    pub fn new(policy: RoyaltyPolicy) -> Self {
        Self { policy }
    }

    /// 计算单本利润、版税率与推荐区间
    ///
    /// 利润为负时照常返回（不截断），便于调用方发现定价错误。
    pub fn compute(&self, input: &RoyaltyInput) -> Result<RoyaltyResult, RoyaltyError> {
        let basis = input.validate()?;
        let price = input.list_price;
        let rate = self.policy.rate_for(input.format, price);

        let (profit, break_even, driver_cost) = match basis {
            CostBasis::Delivery { file_size_mb } => {
                let full_delivery = file_size_mb * self.policy.delivery_cost_per_mb;
                // 传输费只在标准价格带内收取
                let delivery = if self.policy.in_standard_band(price) {
                    full_delivery
                } else {
                    Decimal::ZERO
                };
                (
                    price * rate - delivery,
                    self.ebook_break_even(full_delivery),
                    delivery,
                )
            }
            CostBasis::Printing { printing_cost } => {
                ((price - printing_cost) * rate, printing_cost, printing_cost)
            }
        };

        let recommended_range = self.recommended_range(input.format, rate, break_even, driver_cost);

        let (delivery_cost, printing_cost) = match basis {
            CostBasis::Delivery { .. } => (Some(round_money(driver_cost)), None),
            CostBasis::Printing { .. } => (None, Some(round_money(driver_cost))),
        };

        Ok(RoyaltyResult {
            profit_per_sale: round_money(profit),
            royalty_rate_percent: to_percent(rate),
            delivery_cost,
            printing_cost,
            recommended_range,
        })
    }

    /// 电子书利润不为负的最低价格
    ///
    /// 版税率与传输费按价格分段：标准价格带以下与以上都只按低版税率计、不收传输费，
    /// 因此只要标准价格带下限大于 0，任何价格的利润都不为负。
    fn ebook_break_even(&self, full_delivery: Decimal) -> Decimal {
        let policy = &self.policy;
        if policy.ebook_standard_min > Decimal::ZERO {
            return Decimal::ZERO;
        }

        let in_band = full_delivery
            .checked_div(policy.ebook_standard_rate)
            .unwrap_or(Decimal::ZERO);
        if in_band <= policy.ebook_standard_max {
            in_band
        } else {
            // 带内无法回本时，越过上限即不再收传输费
            policy.ebook_standard_max + MIN_RECOMMENDED_PRICE
        }
    }

    fn recommended_range(
        &self,
        format: SaleFormat,
        rate: Decimal,
        break_even: Decimal,
        driver_cost: Decimal,
    ) -> RecommendedRange {
        let rule = self.policy.range_rule(format);

        let min = ceil_to_cent(break_even).max(MIN_RECOMMENDED_PRICE);
        let mut upper = round_money(min * rule.multiplier);
        if format == SaleFormat::Ebook {
            // 电子书区间延伸到高版税价格带的上限
            upper = upper.max(self.policy.ebook_standard_max);
        }
        let max = upper.min(rule.ceiling).max(min);

        let driver = if format.is_print() {
            "printing cost"
        } else {
            "delivery cost"
        };

        RecommendedRange {
            min,
            max,
            reason: format!(
                "{} at {}% royalty: {} of {}; break-even at {}",
                format.display_name(),
                to_percent(rate),
                driver,
                format_usd(driver_cost),
                format_usd(min),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn calculator() -> RoyaltyCalculator {
        RoyaltyCalculator::default()
    }

    #[test]
    fn test_paperback_example() {
        let input = RoyaltyInput::print(SaleFormat::Paperback, dec("14.99"), dec("3.00"));
        let result = calculator().compute(&input).unwrap();

        assert_eq!(result.profit_per_sale, dec("7.19"));
        assert_eq!(result.royalty_rate_percent, dec("60.0"));
        assert_eq!(result.printing_cost, Some(dec("3.00")));
        assert_eq!(result.delivery_cost, None);
        assert_eq!(result.recommended_range.min, dec("3.00"));
        assert_eq!(result.recommended_range.max, dec("9.00"));
        assert_eq!(
            result.recommended_range.reason,
            "Paperback at 60.0% royalty: printing cost of $3.00; break-even at $3.00"
        );
    }

    #[test]
    fn test_hardcover_uses_its_own_rate() {
        let input = RoyaltyInput::print(SaleFormat::Hardcover, dec("24.99"), dec("5.50"));
        let result = calculator().compute(&input).unwrap();

        // (24.99 - 5.50) * 0.55 = 10.7195
        assert_eq!(result.profit_per_sale, dec("10.72"));
        assert_eq!(result.royalty_rate_percent, dec("55.0"));
        assert_eq!(result.recommended_range.min, dec("5.50"));
        assert_eq!(result.recommended_range.max, dec("22.00"));
    }

    #[test]
    fn test_ebook_standard_band() {
        let input = RoyaltyInput::ebook(dec("4.99"), dec("2"));
        let result = calculator().compute(&input).unwrap();

        // 4.99 * 0.70 - 2 * 0.15 = 3.193
        assert_eq!(result.profit_per_sale, dec("3.19"));
        assert_eq!(result.royalty_rate_percent, dec("70.0"));
        assert_eq!(result.delivery_cost, Some(dec("0.30")));
        assert_eq!(result.printing_cost, None);
        // 标准价格带以下只按 35% 计且不收传输费，一分钱即可回本
        assert_eq!(result.recommended_range.min, dec("0.01"));
        assert_eq!(result.recommended_range.max, dec("9.99"));
        assert!(result.recommended_range.reason.contains("delivery cost of $0.30"));

        let at_min = calculator()
            .compute(&RoyaltyInput::ebook(result.recommended_range.min, dec("2")))
            .unwrap();
        assert_eq!(at_min.profit_per_sale, dec("0.00"));
    }

    #[test]
    fn test_ebook_band_from_zero_breaks_even_inside_band() {
        let policy = RoyaltyPolicy {
            ebook_standard_min: Decimal::ZERO,
            ..RoyaltyPolicy::default()
        };
        let calc = RoyaltyCalculator::new(policy);
        let result = calc.compute(&RoyaltyInput::ebook(dec("4.99"), dec("2"))).unwrap();

        // 0.30 / 0.70 = 0.4285… -> 0.43
        assert_eq!(result.recommended_range.min, dec("0.43"));
        assert_eq!(result.recommended_range.max, dec("9.99"));

        let at_min = calc.compute(&RoyaltyInput::ebook(dec("0.43"), dec("2"))).unwrap();
        assert_eq!(at_min.profit_per_sale, dec("0.00"));
        assert_eq!(at_min.royalty_rate_percent, dec("70.0"));
    }

    #[test]
    fn test_ebook_unrecoverable_in_band_starts_above_band() {
        let policy = RoyaltyPolicy {
            ebook_standard_min: Decimal::ZERO,
            ..RoyaltyPolicy::default()
        };
        // 100 MB * 0.15 = 15.00，带内需 21.43 才能回本，超出上限 9.99
        let result = RoyaltyCalculator::new(policy)
            .compute(&RoyaltyInput::ebook(dec("4.99"), dec("100")))
            .unwrap();

        assert_eq!(result.recommended_range.min, dec("10.00"));
        assert_eq!(result.recommended_range.max, dec("10.00"));
    }

    #[test]
    fn test_ebook_outside_band_has_no_delivery_cost() {
        let input = RoyaltyInput::ebook(dec("12.99"), dec("5"));
        let result = calculator().compute(&input).unwrap();

        // 12.99 * 0.35 = 4.5465
        assert_eq!(result.profit_per_sale, dec("4.55"));
        assert_eq!(result.royalty_rate_percent, dec("35.0"));
        assert_eq!(result.delivery_cost, Some(dec("0.00")));
        assert_eq!(result.recommended_range.min, dec("0.01"));
        assert_eq!(result.recommended_range.max, dec("9.99"));
    }

    #[test]
    fn test_unprofitable_print_is_not_clamped() {
        let input = RoyaltyInput::print(SaleFormat::Paperback, dec("2.00"), dec("3.50"));
        let result = calculator().compute(&input).unwrap();

        assert_eq!(result.profit_per_sale, dec("-0.90"));
    }

    #[test]
    fn test_range_max_capped_by_ceiling() {
        let input = RoyaltyInput::print(SaleFormat::Paperback, dec("60.00"), dec("20.00"));
        let result = calculator().compute(&input).unwrap();

        assert_eq!(result.recommended_range.min, dec("20.00"));
        assert_eq!(result.recommended_range.max, dec("49.99"));
    }

    #[test]
    fn test_range_never_inverted() {
        let input = RoyaltyInput::print(SaleFormat::Paperback, dec("80.00"), dec("55.00"));
        let result = calculator().compute(&input).unwrap();

        assert_eq!(result.recommended_range.min, dec("55.00"));
        assert_eq!(result.recommended_range.max, dec("55.00"));
    }

    #[test]
    fn test_missing_printing_cost_is_invalid() {
        let input = RoyaltyInput {
            format: SaleFormat::Hardcover,
            list_price: dec("19.99"),
            file_size_mb: None,
            printing_cost: None,
        };
        let err = calculator().compute(&input).unwrap_err();
        assert_eq!(err.field(), "printing_cost");
    }

    #[test]
    fn test_custom_policy_rates() {
        let policy = RoyaltyPolicy {
            paperback_rate: dec("0.50"),
            ..RoyaltyPolicy::default()
        };
        let input = RoyaltyInput::print(SaleFormat::Paperback, dec("10.00"), dec("2.00"));
        let result = RoyaltyCalculator::new(policy).compute(&input).unwrap();

        assert_eq!(result.profit_per_sale, dec("4.00"));
        assert_eq!(result.royalty_rate_percent, dec("50.0"));
    }

    fn cents(range: std::ops::Range<i64>) -> impl Strategy<Value = Decimal> {
        range.prop_map(|c| Decimal::new(c, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// 标准价格带内为高版税率，带外为低版税率
        #[test]
        fn ebook_rate_follows_band(price in cents(0..3000), size in cents(0..5000)) {
            let policy = RoyaltyPolicy::default();
            let result = calculator().compute(&RoyaltyInput::ebook(price, size)).unwrap();

            let expected = if policy.in_standard_band(price) {
                policy.ebook_standard_rate
            } else {
                policy.ebook_reduced_rate
            };
            prop_assert_eq!(result.royalty_rate_percent, to_percent(expected));
        }

        /// 印刷版利润恰为 (定价 - 印刷成本) × 版税率，负值不截断
        #[test]
        fn print_profit_formula(price in cents(0..10000), cost in cents(0..10000)) {
            let result = calculator()
                .compute(&RoyaltyInput::print(SaleFormat::Paperback, price, cost))
                .unwrap();

            let expected = round_money((price - cost) * RoyaltyPolicy::default().paperback_rate);
            prop_assert_eq!(result.profit_per_sale, expected);
        }

        /// 推荐下限在盈亏平衡价的一分钱之内
        #[test]
        fn range_min_is_break_even(price in cents(0..10000), cost in cents(1..10000)) {
            let calc = calculator();
            let result = calc
                .compute(&RoyaltyInput::print(SaleFormat::Hardcover, price, cost))
                .unwrap();

            let min = result.recommended_range.min;
            let at_min = calc
                .compute(&RoyaltyInput::print(SaleFormat::Hardcover, min, cost))
                .unwrap();
            prop_assert!(at_min.profit_per_sale.abs() <= Decimal::new(1, 2));
            prop_assert!(result.recommended_range.max >= min);
        }

        /// 电子书推荐下限处利润同样在一分钱之内，且区间不倒置
        #[test]
        fn ebook_range_min_is_break_even(price in cents(0..3000), size in cents(0..5000)) {
            let calc = calculator();
            let result = calc.compute(&RoyaltyInput::ebook(price, size)).unwrap();

            let min = result.recommended_range.min;
            let at_min = calc.compute(&RoyaltyInput::ebook(min, size)).unwrap();
            prop_assert!(at_min.profit_per_sale.abs() <= Decimal::new(1, 2));
            prop_assert!(result.recommended_range.max >= min);
        }

        /// 价格带从 0 开始时，带内回本点同样满足一分钱之内
        #[test]
        fn ebook_in_band_break_even(price in cents(0..3000), size in cents(0..4000)) {
            let calc = RoyaltyCalculator::new(RoyaltyPolicy {
                ebook_standard_min: Decimal::ZERO,
                ..RoyaltyPolicy::default()
            });
            let result = calc.compute(&RoyaltyInput::ebook(price, size)).unwrap();

            let min = result.recommended_range.min;
            let at_min = calc.compute(&RoyaltyInput::ebook(min, size)).unwrap();
            prop_assert!(at_min.profit_per_sale.abs() <= Decimal::new(1, 2));
            prop_assert!(at_min.profit_per_sale >= Decimal::ZERO);
        }
    }
}
