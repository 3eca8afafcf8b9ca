//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddBookHandler, AddBookToWatchlistHandler, CreateWatchlistHandler, DeleteBookHandler,
    DeleteWatchlistHandler, MarkNotificationReadHandler, RemoveBookFromWatchlistHandler,
    UpdatePriceHandler,
    // Query handlers
    CalculateProfitHandler, GetBookHandler, GetPricingSuggestionHandler, GetStatsHandler,
    GetWatchlistBooksHandler, ListBooksHandler, ListNotificationsHandler, ListWatchlistsHandler,
    SearchBooksHandler,
    // Ports
    BookRepositoryPort, BookSearchPort, NotificationRepositoryPort, WatchlistRepositoryPort,
};
use crate::domain::book::ChangeThresholds;
use crate::domain::{PricingAdvisor, RoyaltyCalculator};

/// 领域服务与检索参数
#[derive(Debug, Clone)]
pub struct DomainServices {
    pub royalty: RoyaltyCalculator,
    pub pricing: PricingAdvisor,
    pub thresholds: ChangeThresholds,
    pub search_max_results: u32,
}

impl Default for DomainServices {
    fn default() -> Self {
        Self {
            royalty: RoyaltyCalculator::default(),
            pricing: PricingAdvisor::default(),
            thresholds: ChangeThresholds::default(),
            search_max_results: 10,
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub book_repo: Arc<dyn BookRepositoryPort>,
    pub notification_repo: Arc<dyn NotificationRepositoryPort>,
    pub watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
    pub book_search: Arc<dyn BookSearchPort>,

    // ========== Command Handlers ==========
    pub add_book_handler: AddBookHandler,
    pub delete_book_handler: DeleteBookHandler,
    pub update_price_handler: UpdatePriceHandler,
    pub create_watchlist_handler: CreateWatchlistHandler,
    pub delete_watchlist_handler: DeleteWatchlistHandler,
    pub add_book_to_watchlist_handler: AddBookToWatchlistHandler,
    pub remove_book_from_watchlist_handler: RemoveBookFromWatchlistHandler,
    pub mark_notification_read_handler: MarkNotificationReadHandler,

    // ========== Query Handlers ==========
    pub get_book_handler: GetBookHandler,
    pub list_books_handler: ListBooksHandler,
    pub get_stats_handler: GetStatsHandler,
    pub search_books_handler: SearchBooksHandler,
    pub get_pricing_suggestion_handler: GetPricingSuggestionHandler,
    pub calculate_profit_handler: CalculateProfitHandler,
    pub list_watchlists_handler: ListWatchlistsHandler,
    pub get_watchlist_books_handler: GetWatchlistBooksHandler,
    pub list_notifications_handler: ListNotificationsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        notification_repo: Arc<dyn NotificationRepositoryPort>,
        watchlist_repo: Arc<dyn WatchlistRepositoryPort>,
        book_search: Arc<dyn BookSearchPort>,
        services: DomainServices,
    ) -> Self {
        Self {
            // Ports
            book_repo: book_repo.clone(),
            notification_repo: notification_repo.clone(),
            watchlist_repo: watchlist_repo.clone(),
            book_search: book_search.clone(),

            // Command handlers
            add_book_handler: AddBookHandler::new(book_repo.clone()),
            delete_book_handler: DeleteBookHandler::new(book_repo.clone()),
            update_price_handler: UpdatePriceHandler::new(book_repo.clone(), services.thresholds),
            create_watchlist_handler: CreateWatchlistHandler::new(watchlist_repo.clone()),
            delete_watchlist_handler: DeleteWatchlistHandler::new(watchlist_repo.clone()),
            add_book_to_watchlist_handler: AddBookToWatchlistHandler::new(
                watchlist_repo.clone(),
                book_repo.clone(),
            ),
            remove_book_from_watchlist_handler: RemoveBookFromWatchlistHandler::new(
                watchlist_repo.clone(),
            ),
            mark_notification_read_handler: MarkNotificationReadHandler::new(
                notification_repo.clone(),
            ),

            // Query handlers
            get_book_handler: GetBookHandler::new(book_repo.clone()),
            list_books_handler: ListBooksHandler::new(book_repo.clone()),
            get_stats_handler: GetStatsHandler::new(book_repo.clone(), notification_repo.clone()),
            search_books_handler: SearchBooksHandler::new(
                book_search.clone(),
                services.search_max_results,
            ),
            get_pricing_suggestion_handler: GetPricingSuggestionHandler::new(
                book_repo.clone(),
                services.pricing,
            ),
            calculate_profit_handler: CalculateProfitHandler::new(services.royalty),
            list_watchlists_handler: ListWatchlistsHandler::new(watchlist_repo.clone()),
            get_watchlist_books_handler: GetWatchlistBooksHandler::new(watchlist_repo.clone()),
            list_notifications_handler: ListNotificationsHandler::new(notification_repo.clone()),
        }
    }
}
