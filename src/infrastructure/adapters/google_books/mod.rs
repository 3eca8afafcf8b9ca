//! Google Books Adapter - 外部图书目录检索实现

mod google_books_client;

pub use google_books_client::*;
