//! Search HTTP Handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::{BookSearchResult, SearchBooks};
use crate::infrastructure::http::dto::{BooksResponse, SearchBookRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 在外部目录中检索图书
pub async fn search_book(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SearchBookRequest>, JsonRejection>,
) -> Result<Json<BooksResponse<BookSearchResult>>, ApiError> {
    let Json(req) = body?;
    let books = state
        .search_books_handler
        .handle(SearchBooks { query: req.query })
        .await?;

    Ok(Json(BooksResponse { books }))
}
