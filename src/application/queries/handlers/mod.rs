//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod book_handlers;
mod notification_handlers;
mod pricing_handlers;
mod watchlist_handlers;

pub use book_handlers::*;
pub use notification_handlers::*;
pub use pricing_handlers::*;
pub use watchlist_handlers::*;
