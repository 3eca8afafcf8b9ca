//! Pricing HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{ApplicationError, CalculateProfit, GetPricingSuggestion};
use crate::domain::{PricingSuggestion, RoyaltyError, RoyaltyInput, RoyaltyResult, SaleFormat};
use crate::infrastructure::http::dto::ProfitCalculatorRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

impl TryFrom<ProfitCalculatorRequest> for RoyaltyInput {
    type Error = RoyaltyError;

    fn try_from(req: ProfitCalculatorRequest) -> Result<Self, Self::Error> {
        let format: SaleFormat = req
            .format
            .as_deref()
            .ok_or_else(|| RoyaltyError::invalid("format", "format is required"))?
            .parse()?;
        let list_price = req
            .price
            .ok_or_else(|| RoyaltyError::invalid("price", "price is required"))?;

        Ok(RoyaltyInput {
            format,
            list_price,
            file_size_mb: req.file_size,
            printing_cost: req.printing_cost,
        })
    }
}

/// 计算单本利润与推荐定价区间
pub async fn profit_calculator(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProfitCalculatorRequest>, JsonRejection>,
) -> Result<Json<RoyaltyResult>, ApiError> {
    let Json(req) = body?;
    let input = RoyaltyInput::try_from(req).map_err(ApplicationError::from)?;
    let result = state
        .calculate_profit_handler
        .handle(CalculateProfit { input })?;

    Ok(Json(result))
}

/// 基于同类竞品的定价建议
pub async fn pricing_suggestion(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PricingSuggestion>, ApiError> {
    let Path(book_id) = path?;
    let suggestion = state
        .get_pricing_suggestion_handler
        .handle(GetPricingSuggestion { book_id })
        .await?;

    Ok(Json(suggestion))
}
