//! Watchlist Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{WatchlistBookRecord, WatchlistRecord, WatchlistRepositoryPort};
use crate::application::queries::{GetWatchlistBooks, ListWatchlists};

/// ListWatchlists Handler
pub struct ListWatchlistsHandler {
    watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
}

impl ListWatchlistsHandler {
    pub fn new(watchlist_repo: Arc<dyn WatchlistRepositoryPort>) -> Self {
        Self { watchlist_repo }
    }

    pub async fn handle(&self, _query: ListWatchlists) -> Result<Vec<WatchlistRecord>, ApplicationError> {
        Ok(self.watchlist_repo.find_all().await?)
    }
}

/// GetWatchlistBooks Handler
pub struct GetWatchlistBooksHandler {
    watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
}

impl GetWatchlistBooksHandler {
    pub fn new(watchlist_repo: Arc<dyn WatchlistRepositoryPort>) -> Self {
        Self { watchlist_repo }
    }

    pub async fn handle(
        &self,
        query: GetWatchlistBooks,
    ) -> Result<Vec<WatchlistBookRecord>, ApplicationError> {
        self.watchlist_repo
            .find_by_id(query.watchlist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Watchlist", query.watchlist_id))?;

        Ok(self.watchlist_repo.find_books(query.watchlist_id).await?)
    }
}
