//! Pricing Context - 定价建议

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PricingPolicy;
use crate::domain::book::BookSummary;
use crate::domain::money::{format_usd, mean_of_present, round_money, round_rating, to_percent};

/// 定价分析明细
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingAnalysis {
    pub competitor_count: usize,
    pub avg_competitor_price: Option<Decimal>,
    pub avg_competitor_rating: Option<Decimal>,
    /// 例如 "$10.00–$20.00"
    #[serde(rename = "price_range")]
    pub price_range_text: Option<String>,
    pub reasoning: String,
}

/// 定价建议（按需计算，不持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSuggestion {
    pub suggested_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub analysis: PricingAnalysis,
}

/// 定价顾问
///
/// 纯函数式：相同输入总是得到相同输出。竞品集合由调用方（图书仓储）选定。
#[derive(Debug, Clone, Default)]
pub struct PricingAdvisor {
    policy: PricingPolicy,
}

impl PricingAdvisor {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// 根据同类竞品给出建议价格与区间
    ///
    /// 没有竞品或竞品均无价格时不报错，回退到当前价或默认价。
    pub fn suggest(&self, target: &BookSummary, competitors: &[BookSummary]) -> PricingSuggestion {
        let competitor_count = competitors.len();
        let avg_price = mean_of_present(competitors.iter().map(|c| c.price));
        let avg_rating = mean_of_present(competitors.iter().map(|c| c.rating));
        let price_range_text = price_range_text(competitors);

        let mut reasons = Vec::new();

        let (suggested, band) = match avg_price {
            Some(market) => {
                let priced = competitors.iter().filter(|c| c.price.is_some()).count();
                reasons.push(competitor_clause(competitor_count, priced));

                let base = self.blend(market, target.price, &mut reasons);
                let adjusted = self.adjust_for_rating(base, target.rating, avg_rating, &mut reasons);
                let adjusted = self.adjust_for_pages(adjusted, target, competitors, &mut reasons);
                (adjusted, self.policy.band)
            }
            None => (self.fallback(target, competitor_count, &mut reasons), self.policy.fallback_band),
        };
        let suggested = self.apply_floor(suggested, &mut reasons);

        let suggested_price = round_money(suggested);
        let min_price = round_money(suggested_price * (Decimal::ONE - band)).max(self.policy.price_floor);
        let max_price = round_money(suggested_price * (Decimal::ONE + band)).max(min_price);

        PricingSuggestion {
            suggested_price,
            min_price,
            max_price,
            analysis: PricingAnalysis {
                competitor_count,
                avg_competitor_price: avg_price.map(round_money),
                avg_competitor_rating: avg_rating.map(round_rating),
                price_range_text,
                reasoning: reasons.join("; "),
            },
        }
    }

    /// 市场均价与当前价加权混合
    fn blend(&self, market: Decimal, current: Option<Decimal>, reasons: &mut Vec<String>) -> Decimal {
        let weight = self.policy.market_weight;
        match current {
            Some(current) => {
                reasons.push(format!(
                    "blended {}% market average {} with {}% current price {}",
                    to_percent(weight).normalize(),
                    format_usd(market),
                    to_percent(Decimal::ONE - weight).normalize(),
                    format_usd(current),
                ));
                market * weight + current * (Decimal::ONE - weight)
            }
            None => {
                reasons.push(format!("market average {} (no current price)", format_usd(market)));
                market
            }
        }
    }

    fn adjust_for_rating(
        &self,
        base: Decimal,
        rating: Option<Decimal>,
        avg_rating: Option<Decimal>,
        reasons: &mut Vec<String>,
    ) -> Decimal {
        let (Some(rating), Some(avg)) = (rating, avg_rating) else {
            return base;
        };

        let diff = rating - avg;
        if diff > self.policy.rating_threshold {
            reasons.push(format!(
                "rating {:.1} above competitor average {:.1}: +{}% premium",
                round_rating(rating),
                round_rating(avg),
                to_percent(self.policy.rating_premium).normalize(),
            ));
            base * (Decimal::ONE + self.policy.rating_premium)
        } else if diff < -self.policy.rating_threshold {
            reasons.push(format!(
                "rating {:.1} below competitor average {:.1}: -{}% discount",
                round_rating(rating),
                round_rating(avg),
                to_percent(self.policy.rating_discount).normalize(),
            ));
            base * (Decimal::ONE - self.policy.rating_discount)
        } else {
            base
        }
    }

    fn adjust_for_pages(
        &self,
        base: Decimal,
        target: &BookSummary,
        competitors: &[BookSummary],
        reasons: &mut Vec<String>,
    ) -> Decimal {
        let avg_pages = mean_of_present(competitors.iter().map(|c| c.page_count.map(Decimal::from)));
        let (Some(pages), Some(avg_pages)) = (target.page_count, avg_pages) else {
            return base;
        };

        let pages = Decimal::from(pages);
        if pages > avg_pages * self.policy.long_page_ratio {
            reasons.push(format!(
                "{} pages vs competitor average {}: +{}% length premium",
                pages,
                avg_pages.round(),
                to_percent(self.policy.long_page_premium).normalize(),
            ));
            base * (Decimal::ONE + self.policy.long_page_premium)
        } else if pages < avg_pages * self.policy.short_page_ratio {
            reasons.push(format!(
                "{} pages vs competitor average {}: -{}% length discount",
                pages,
                avg_pages.round(),
                to_percent(self.policy.short_page_discount).normalize(),
            ));
            base * (Decimal::ONE - self.policy.short_page_discount)
        } else {
            base
        }
    }

    /// 建议价不低于价格下限（市场路径与回退路径共用）
    fn apply_floor(&self, price: Decimal, reasons: &mut Vec<String>) -> Decimal {
        if price < self.policy.price_floor {
            reasons.push(format!("raised to floor {}", format_usd(self.policy.price_floor)));
            self.policy.price_floor
        } else {
            price
        }
    }

    /// 无可用竞品价格时的回退
    fn fallback(&self, target: &BookSummary, competitor_count: usize, reasons: &mut Vec<String>) -> Decimal {
        if competitor_count == 0 {
            reasons.push("no competitor data available".to_string());
        } else {
            reasons.push(format!(
                "no competitor prices available among {} competitor{}",
                competitor_count,
                plural(competitor_count)
            ));
        }

        match target.price {
            Some(current) => {
                reasons.push(format!("keeping current price {}", format_usd(current)));
                current
            }
            None => {
                let price = self.policy.default_price_for(target.page_count);
                match target.page_count {
                    Some(pages) => reasons.push(format!(
                        "default price {} for a {}-page book",
                        format_usd(price),
                        pages
                    )),
                    None => reasons.push(format!("default price {}", format_usd(price))),
                }
                price
            }
        }
    }
}

fn competitor_clause(total: usize, priced: usize) -> String {
    if priced == total {
        format!("{} competitor{} in the same category", total, plural(total))
    } else {
        format!(
            "{} competitor{} in the same category ({} with a known price)",
            total,
            plural(total),
            priced
        )
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// 已知价格竞品的最低到最高价
fn price_range_text(competitors: &[BookSummary]) -> Option<String> {
    let mut prices = competitors.iter().filter_map(|c| c.price);
    let first = prices.next()?;
    let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    Some(format!("{}–{}", format_usd(min), format_usd(max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn book(id: i64, price: Option<&str>, rating: Option<&str>) -> BookSummary {
        BookSummary {
            id,
            title: format!("Book {}", id),
            author: "Author".to_string(),
            price: price.map(dec),
            rating: rating.map(dec),
            category: Some("Fantasy".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_competitors_keeps_current_price() {
        let target = book(1, Some("6.49"), Some("4.2"));
        let suggestion = PricingAdvisor::default().suggest(&target, &[]);

        assert_eq!(suggestion.suggested_price, dec("6.49"));
        assert_eq!(suggestion.min_price, dec("5.19"));
        assert_eq!(suggestion.max_price, dec("7.79"));
        assert_eq!(suggestion.analysis.competitor_count, 0);
        assert_eq!(suggestion.analysis.avg_competitor_price, None);
        assert_eq!(suggestion.analysis.price_range_text, None);
        assert_eq!(
            suggestion.analysis.reasoning,
            "no competitor data available; keeping current price $6.49"
        );
    }

    #[test]
    fn test_no_competitors_no_price_uses_page_default() {
        let mut target = book(1, None, None);
        target.page_count = Some(420);
        let suggestion = PricingAdvisor::default().suggest(&target, &[]);

        assert_eq!(suggestion.suggested_price, dec("4.99"));
        assert_eq!(
            suggestion.analysis.reasoning,
            "no competitor data available; default price $4.99 for a 420-page book"
        );
    }

    #[test]
    fn test_missing_prices_excluded_from_average() {
        let target = book(1, None, None);
        let competitors = vec![
            book(2, Some("10"), None),
            book(3, Some("20"), None),
            book(4, None, None),
        ];
        let suggestion = PricingAdvisor::default().suggest(&target, &competitors);

        assert_eq!(suggestion.analysis.competitor_count, 3);
        assert_eq!(suggestion.analysis.avg_competitor_price, Some(dec("15")));
        assert_eq!(suggestion.analysis.avg_competitor_rating, None);
        assert_eq!(
            suggestion.analysis.price_range_text.as_deref(),
            Some("$10.00–$20.00")
        );
        assert_eq!(suggestion.suggested_price, dec("15.00"));
        assert_eq!(suggestion.min_price, dec("12.75"));
        assert_eq!(suggestion.max_price, dec("17.25"));
        assert_eq!(
            suggestion.analysis.reasoning,
            "3 competitors in the same category (2 with a known price); market average $15.00 (no current price)"
        );
    }

    #[test]
    fn test_blend_with_current_price() {
        let target = book(1, Some("5.00"), None);
        let competitors = vec![book(2, Some("10.00"), None)];
        let suggestion = PricingAdvisor::default().suggest(&target, &competitors);

        // 10 * 0.6 + 5 * 0.4 = 8
        assert_eq!(suggestion.suggested_price, dec("8.00"));
        assert!(suggestion
            .analysis
            .reasoning
            .contains("blended 60% market average $10.00 with 40% current price $5.00"));
    }

    #[test]
    fn test_higher_rating_adds_premium() {
        let target = book(1, Some("10.00"), Some("4.8"));
        let competitors = vec![book(2, Some("10.00"), Some("4.0")), book(3, Some("10.00"), Some("4.2"))];
        let suggestion = PricingAdvisor::default().suggest(&target, &competitors);

        assert_eq!(suggestion.suggested_price, dec("11.50"));
        assert_eq!(suggestion.analysis.avg_competitor_rating, Some(dec("4.1")));
        assert!(suggestion
            .analysis
            .reasoning
            .contains("rating 4.8 above competitor average 4.1: +15% premium"));
    }

    #[test]
    fn test_lower_rating_applies_discount() {
        let target = book(1, Some("10.00"), Some("3.0"));
        let competitors = vec![book(2, Some("10.00"), Some("4.5"))];
        let suggestion = PricingAdvisor::default().suggest(&target, &competitors);

        assert_eq!(suggestion.suggested_price, dec("9.00"));
    }

    #[test]
    fn test_missing_rating_skips_adjustment() {
        let target = book(1, Some("10.00"), None);
        let competitors = vec![book(2, Some("10.00"), Some("2.0"))];
        let suggestion = PricingAdvisor::default().suggest(&target, &competitors);

        assert_eq!(suggestion.suggested_price, dec("10.00"));
    }

    #[test]
    fn test_long_book_premium() {
        let mut target = book(1, None, None);
        target.page_count = Some(600);
        let mut competitor = book(2, Some("10.00"), None);
        competitor.page_count = Some(300);
        let suggestion = PricingAdvisor::default().suggest(&target, &[competitor]);

        assert_eq!(suggestion.suggested_price, dec("11.00"));
    }

    #[test]
    fn test_competitors_without_prices_fall_back() {
        let target = book(1, Some("3.99"), Some("4.9"));
        let competitors = vec![book(2, None, Some("3.0"))];
        let suggestion = PricingAdvisor::default().suggest(&target, &competitors);

        assert_eq!(suggestion.suggested_price, dec("3.99"));
        assert_eq!(suggestion.analysis.competitor_count, 1);
        assert_eq!(suggestion.analysis.avg_competitor_rating, Some(dec("3.0")));
        assert!(suggestion
            .analysis
            .reasoning
            .starts_with("no competitor prices available among 1 competitor;"));
    }

    #[test]
    fn test_floor_applies() {
        let target = book(1, None, None);
        let competitors = vec![book(2, Some("0.10"), None)];
        let suggestion = PricingAdvisor::default().suggest(&target, &competitors);

        assert_eq!(suggestion.suggested_price, dec("0.99"));
        assert_eq!(suggestion.min_price, dec("0.99"));
        assert!(suggestion.analysis.reasoning.ends_with("raised to floor $0.99"));
    }

    #[test]
    fn test_zero_priced_target_without_competitors_raised_to_floor() {
        let target = book(1, Some("0.00"), None);
        let suggestion = PricingAdvisor::default().suggest(&target, &[]);

        assert_eq!(suggestion.suggested_price, dec("0.99"));
        assert_eq!(suggestion.min_price, dec("0.99"));
        assert_eq!(suggestion.max_price, dec("1.19"));
        assert_eq!(
            suggestion.analysis.reasoning,
            "no competitor data available; keeping current price $0.00; raised to floor $0.99"
        );
    }

    #[test]
    fn test_unpriced_competitors_with_tiny_price_raised_to_floor() {
        let target = book(1, Some("0.25"), None);
        let competitors = vec![book(2, None, Some("4.0"))];
        let suggestion = PricingAdvisor::default().suggest(&target, &competitors);

        assert_eq!(suggestion.suggested_price, dec("0.99"));
        assert!(suggestion.min_price <= suggestion.suggested_price);
    }

    proptest! {
        /// 建议价总在自身区间内，且不低于价格下限
        #[test]
        fn suggestion_within_its_range(
            prices in prop::collection::vec(prop::option::of(0i64..5000), 0..6),
            current in prop::option::of(0i64..5000),
            pages in prop::option::of(1i64..900),
        ) {
            let target = BookSummary {
                price: current.map(|c| Decimal::new(c, 2)),
                page_count: pages,
                ..book(1, None, Some("4.0"))
            };
            let competitors: Vec<BookSummary> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| BookSummary {
                    price: p.map(|c| Decimal::new(c, 2)),
                    ..book(i as i64 + 2, None, Some("3.5"))
                })
                .collect();

            let policy = PricingPolicy::default();
            let floor = policy.price_floor;
            let suggestion = PricingAdvisor::new(policy).suggest(&target, &competitors);

            prop_assert!(suggestion.suggested_price >= floor);
            prop_assert!(suggestion.min_price <= suggestion.suggested_price);
            prop_assert!(suggestion.suggested_price <= suggestion.max_price);
        }

        /// 相同输入两次调用结果完全一致
        #[test]
        fn suggest_is_idempotent(
            prices in prop::collection::vec(prop::option::of(1i64..5000), 0..8),
            current in prop::option::of(1i64..5000),
        ) {
            let target = BookSummary {
                price: current.map(|c| Decimal::new(c, 2)),
                ..book(1, None, Some("4.0"))
            };
            let competitors: Vec<BookSummary> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| BookSummary {
                    price: p.map(|c| Decimal::new(c, 2)),
                    ..book(i as i64 + 2, None, Some("3.5"))
                })
                .collect();

            let advisor = PricingAdvisor::default();
            prop_assert_eq!(
                advisor.suggest(&target, &competitors),
                advisor.suggest(&target, &competitors)
            );
        }

        /// 评分高出阈值时，建议价严格高于未调整的混合基准价
        #[test]
        fn higher_rating_beats_blended_base(
            market in 100i64..5000,
            current in 100i64..5000,
        ) {
            let market = Decimal::new(market, 2);
            let current = Decimal::new(current, 2);
            let target = BookSummary {
                price: Some(current),
                ..book(1, None, Some("4.9"))
            };
            let competitors = vec![BookSummary {
                price: Some(market),
                ..book(2, None, Some("3.9"))
            }];

            let policy = PricingPolicy::default();
            let base = market * policy.market_weight + current * (Decimal::ONE - policy.market_weight);
            let suggestion = PricingAdvisor::new(policy).suggest(&target, &competitors);

            prop_assert!(suggestion.suggested_price > round_money(base));
        }
    }
}
