//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod book_handlers;
mod notification_handlers;
mod watchlist_handlers;

pub use book_handlers::*;
pub use notification_handlers::*;
pub use watchlist_handlers::*;
