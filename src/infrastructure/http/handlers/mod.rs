//! HTTP Handlers

mod book;
mod notification;
mod ping;
mod pricing;
mod search;
mod watchlist;

pub use book::*;
pub use notification::*;
pub use ping::*;
pub use pricing::*;
pub use search::*;
pub use watchlist::*;
