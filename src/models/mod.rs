//! Data models for Nexus

pub mod book;
pub mod borrow;
pub mod category;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookInfo, BookSnapshot};
pub use borrow::{BorrowReceipt, BorrowRecord, NewBorrow, ReturnReceipt};
pub use category::{Category, Writer};
pub use user::UserClaims;
