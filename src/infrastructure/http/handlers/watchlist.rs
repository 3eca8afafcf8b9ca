//! Watchlist HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{
    AddBookToWatchlist, CreateWatchlist, DeleteWatchlist, GetWatchlistBooks, ListWatchlists,
    RemoveBookFromWatchlist,
};
use crate::infrastructure::http::dto::{
    BooksResponse, CreateWatchlistRequest, CreateWatchlistResponse, SuccessResponse,
    WatchlistAddBookRequest, WatchlistBookDto, WatchlistDto, WatchlistsResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn list_watchlists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WatchlistsResponse>, ApiError> {
    let watchlists = state.list_watchlists_handler.handle(ListWatchlists).await?;

    Ok(Json(WatchlistsResponse {
        watchlists: watchlists.into_iter().map(WatchlistDto::from).collect(),
    }))
}

pub async fn create_watchlist(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateWatchlistRequest>, JsonRejection>,
) -> Result<Json<CreateWatchlistResponse>, ApiError> {
    let Json(req) = body?;
    let watchlist_id = state
        .create_watchlist_handler
        .handle(CreateWatchlist {
            name: req.name,
            description: req.description,
        })
        .await?;

    Ok(Json(CreateWatchlistResponse {
        success: true,
        watchlist_id,
    }))
}

pub async fn delete_watchlist(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(watchlist_id) = path?;
    state
        .delete_watchlist_handler
        .handle(DeleteWatchlist { watchlist_id })
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn get_watchlist_books(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BooksResponse<WatchlistBookDto>>, ApiError> {
    let Path(watchlist_id) = path?;
    let books = state
        .get_watchlist_books_handler
        .handle(GetWatchlistBooks { watchlist_id })
        .await?;

    Ok(Json(BooksResponse {
        books: books.into_iter().map(WatchlistBookDto::from).collect(),
    }))
}

pub async fn add_book_to_watchlist(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<WatchlistAddBookRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(watchlist_id) = path?;
    let Json(req) = body?;
    let book_id = req
        .book_id
        .ok_or_else(|| ApiError::BadRequest("book_id is required".to_string()))?;

    state
        .add_book_to_watchlist_handler
        .handle(AddBookToWatchlist {
            watchlist_id,
            book_id,
        })
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn remove_book_from_watchlist(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path((watchlist_id, book_id)) = path?;
    state
        .remove_book_from_watchlist_handler
        .handle(RemoveBookFromWatchlist {
            watchlist_id,
            book_id,
        })
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
