//! Book HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{DeleteBook, GetBook, GetStats, ListBooks, UpdatePrice};
use crate::infrastructure::http::dto::{
    AddBookRequest, AddBookResponse, BookDetailsDto, BookDto, BooksResponse, StatsDto,
    SuccessResponse, UpdatePriceRequest, UpdatePriceResponseDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有追踪的图书
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BooksResponse<BookDto>>, ApiError> {
    let books = state.list_books_handler.handle(ListBooks).await?;

    Ok(Json(BooksResponse {
        books: books.into_iter().map(BookDto::from).collect(),
    }))
}

/// 新增追踪图书
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddBookRequest>, JsonRejection>,
) -> Result<Json<AddBookResponse>, ApiError> {
    let Json(req) = body?;
    let book_id = state.add_book_handler.handle(req.into()).await?;

    Ok(Json(AddBookResponse {
        success: true,
        book_id,
    }))
}

/// 图书详情（含价格历史）
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookDetailsDto>, ApiError> {
    let Path(book_id) = path?;
    let details = state.get_book_handler.handle(GetBook { book_id }).await?;

    Ok(Json(BookDetailsDto {
        book: details.book.into(),
        history: details.price_history.into_iter().map(Into::into).collect(),
    }))
}

/// 删除图书
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(book_id) = path?;
    state.delete_book_handler.handle(DeleteBook { book_id }).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// 更新价格（同时用于应用建议价）
pub async fn update_price(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdatePriceRequest>, JsonRejection>,
) -> Result<Json<UpdatePriceResponseDto>, ApiError> {
    let Path(book_id) = path?;
    let Json(req) = body?;
    let price = req
        .price
        .ok_or_else(|| ApiError::BadRequest("price is required".to_string()))?;

    let response = state
        .update_price_handler
        .handle(UpdatePrice {
            book_id,
            price,
            rating: req.rating,
            reviews_count: req.reviews_count,
        })
        .await?;

    Ok(Json(UpdatePriceResponseDto {
        success: true,
        notifications: response.notifications,
    }))
}

/// 汇总统计
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsDto>, ApiError> {
    let stats = state.get_stats_handler.handle(GetStats).await?;

    Ok(Json(stats.into()))
}
