//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、BookSearch）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Book commands
    AddBook,
    DeleteBook,
    UpdatePrice,
    // Notification commands
    MarkNotificationRead,
    // Watchlist commands
    AddBookToWatchlist,
    CreateWatchlist,
    DeleteWatchlist,
    RemoveBookFromWatchlist,
    // Handlers
    handlers::{
        AddBookHandler, AddBookToWatchlistHandler, CreateWatchlistHandler, DeleteBookHandler,
        DeleteWatchlistHandler, MarkNotificationReadHandler, RemoveBookFromWatchlistHandler,
        UpdatePriceHandler, UpdatePriceResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Book search
    BookSearchPort,
    BookSearchResult,
    SearchError,
    // Repositories
    BookRecord,
    BookRepositoryPort,
    NewBook,
    NotificationRecord,
    NotificationRepositoryPort,
    PriceChange,
    PriceHistoryRecord,
    PriceUpdate,
    RepositoryError,
    WatchlistBookRecord,
    WatchlistRecord,
    WatchlistRepositoryPort,
};

pub use queries::{
    // Book queries
    GetBook,
    GetStats,
    ListBooks,
    SearchBooks,
    // Notification queries
    ListNotifications,
    // Pricing queries
    CalculateProfit,
    GetPricingSuggestion,
    // Watchlist queries
    GetWatchlistBooks,
    ListWatchlists,
    // Handlers
    handlers::{
        BookDetailsResponse, CalculateProfitHandler, GetBookHandler, GetPricingSuggestionHandler,
        GetStatsHandler, GetWatchlistBooksHandler, ListBooksHandler, ListNotificationsHandler,
        ListWatchlistsHandler, SearchBooksHandler, StatsResponse,
    },
};
