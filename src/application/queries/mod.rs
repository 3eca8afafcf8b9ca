//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod book_queries;
mod notification_queries;
mod pricing_queries;
mod watchlist_queries;

pub mod handlers;

pub use book_queries::*;
pub use notification_queries::*;
pub use pricing_queries::*;
pub use watchlist_queries::*;
