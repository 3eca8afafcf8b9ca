//! Watchlist Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    AddBookToWatchlist, CreateWatchlist, DeleteWatchlist, RemoveBookFromWatchlist,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, WatchlistRepositoryPort};

// ============================================================================
// CreateWatchlist
// ============================================================================

/// CreateWatchlist Handler
pub struct CreateWatchlistHandler {
    watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
}

impl CreateWatchlistHandler {
    pub fn new(watchlist_repo: Arc<dyn WatchlistRepositoryPort>) -> Self {
        Self { watchlist_repo }
    }

    /// 创建清单，返回清单 ID；同名清单返回 Conflict
    pub async fn handle(&self, command: CreateWatchlist) -> Result<i64, ApplicationError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ApplicationError::validation("name is required"));
        }
        let description = command
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let watchlist_id = self.watchlist_repo.create(name, description).await?;

        tracing::info!(watchlist_id = watchlist_id, name = %name, "Watchlist created");

        Ok(watchlist_id)
    }
}

// ============================================================================
// DeleteWatchlist
// ============================================================================

/// DeleteWatchlist Handler
pub struct DeleteWatchlistHandler {
    watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
}

impl DeleteWatchlistHandler {
    pub fn new(watchlist_repo: Arc<dyn WatchlistRepositoryPort>) -> Self {
        Self { watchlist_repo }
    }

    pub async fn handle(&self, command: DeleteWatchlist) -> Result<(), ApplicationError> {
        self.watchlist_repo
            .find_by_id(command.watchlist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Watchlist", command.watchlist_id))?;

        self.watchlist_repo.delete(command.watchlist_id).await?;

        tracing::info!(watchlist_id = command.watchlist_id, "Watchlist deleted");

        Ok(())
    }
}

// ============================================================================
// AddBookToWatchlist / RemoveBookFromWatchlist
// ============================================================================

/// AddBookToWatchlist Handler
pub struct AddBookToWatchlistHandler {
    watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl AddBookToWatchlistHandler {
    pub fn new(
        watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self {
            watchlist_repo,
            book_repo,
        }
    }

    pub async fn handle(&self, command: AddBookToWatchlist) -> Result<(), ApplicationError> {
        self.watchlist_repo
            .find_by_id(command.watchlist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Watchlist", command.watchlist_id))?;
        self.book_repo
            .find_by_id(command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", command.book_id))?;

        self.watchlist_repo
            .add_book(command.watchlist_id, command.book_id)
            .await?;

        tracing::info!(
            watchlist_id = command.watchlist_id,
            book_id = command.book_id,
            "Book added to watchlist"
        );

        Ok(())
    }
}

/// RemoveBookFromWatchlist Handler
///
/// 图书不在清单中时视为成功。
pub struct RemoveBookFromWatchlistHandler {
    watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
}

impl RemoveBookFromWatchlistHandler {
    pub fn new(watchlist_repo: Arc<dyn WatchlistRepositoryPort>) -> Self {
        Self { watchlist_repo }
    }

    pub async fn handle(&self, command: RemoveBookFromWatchlist) -> Result<(), ApplicationError> {
        self.watchlist_repo
            .find_by_id(command.watchlist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Watchlist", command.watchlist_id))?;

        self.watchlist_repo
            .remove_book(command.watchlist_id, command.book_id)
            .await?;

        tracing::info!(
            watchlist_id = command.watchlist_id,
            book_id = command.book_id,
            "Book removed from watchlist"
        );

        Ok(())
    }
}
