//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod book_search;
mod repositories;

pub use book_search::{BookSearchPort, BookSearchResult, SearchError};
pub use repositories::{
    BookRecord, BookRepositoryPort, NewBook, NotificationRecord, NotificationRepositoryPort,
    PriceChange, PriceHistoryRecord, PriceUpdate, RepositoryError, WatchlistBookRecord, WatchlistRecord,
    WatchlistRepositoryPort,
};
