//! Pricing Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::BookRepositoryPort;
use crate::application::queries::{CalculateProfit, GetPricingSuggestion};
use crate::domain::{PricingAdvisor, PricingSuggestion, RoyaltyCalculator, RoyaltyResult};

/// GetPricingSuggestion Handler
///
/// 竞品为与目标图书至少共享一个分类标签的其他图书。
pub struct GetPricingSuggestionHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    advisor: PricingAdvisor,
}

impl GetPricingSuggestionHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, advisor: PricingAdvisor) -> Self {
        Self { book_repo, advisor }
    }

    pub async fn handle(
        &self,
        query: GetPricingSuggestion,
    ) -> Result<PricingSuggestion, ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let target = book.summary();
        let tags = target.category_tags();
        let competitors: Vec<_> = if tags.is_empty() {
            Vec::new()
        } else {
            self.book_repo
                .find_sharing_category(book.id, &tags)
                .await?
                .iter()
                .map(|record| record.summary())
                .collect()
        };

        let suggestion = self.advisor.suggest(&target, &competitors);

        tracing::info!(
            book_id = book.id,
            competitors = competitors.len(),
            suggested_price = %suggestion.suggested_price,
            "Pricing suggestion computed"
        );

        Ok(suggestion)
    }
}

/// CalculateProfit Handler
pub struct CalculateProfitHandler {
    calculator: RoyaltyCalculator,
}

impl CalculateProfitHandler {
    pub fn new(calculator: RoyaltyCalculator) -> Self {
        Self { calculator }
    }

    pub fn handle(&self, query: CalculateProfit) -> Result<RoyaltyResult, ApplicationError> {
        let result = self.calculator.compute(&query.input)?;

        tracing::debug!(
            format = %query.input.format,
            list_price = %query.input.list_price,
            profit = %result.profit_per_sale,
            "Profit calculated"
        );

        Ok(result)
    }
}
