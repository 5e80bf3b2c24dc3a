//! Repository layer for store operations

pub mod books;
pub mod borrows;
pub mod memory;
pub mod reference;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookInfo},
        borrow::{BorrowReceipt, BorrowRecord, InsertResult, NewBorrow, ReturnReceipt, UpdateResult},
        category::{Category, Writer},
    },
};

pub use memory::MemoryStore;

/// Operations the server needs from the document store.
///
/// Reads are plain lookups. The two `commit_*` methods each apply a pair of
/// mutations (borrow record + stock change) atomically: either both are
/// visible afterwards or neither is. Implementations re-check the stock and
/// duplicate conditions inside the commit, so callers that race past their
/// own pre-checks still cannot oversell.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// All books, most recently added first
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>>;

    /// Books of one category, or all books when `category` is `None`
    async fn books_by_category(&self, category: Option<String>) -> AppResult<Vec<Book>>;

    async fn insert_book(&self, info: BookInfo) -> AppResult<InsertResult>;

    /// Set the editable fields of `id`, inserting the book if it does not exist
    async fn upsert_book(&self, id: Uuid, info: BookInfo) -> AppResult<UpdateResult>;

    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    async fn list_writers(&self) -> AppResult<Vec<Writer>>;

    async fn find_borrow(&self, id: Uuid) -> AppResult<Option<BorrowRecord>>;

    /// The active record of `email` for `book_id`, if any
    async fn find_borrow_for(&self, book_id: Uuid, email: &str) -> AppResult<Option<BorrowRecord>>;

    async fn list_borrows(&self, email: &str) -> AppResult<Vec<BorrowRecord>>;

    /// Insert the record and take one copy off the shelf.
    ///
    /// Fails with `AlreadyBorrowed` or `OutOfStock` without mutating anything.
    async fn commit_borrow(&self, borrow: NewBorrow) -> AppResult<BorrowReceipt>;

    /// Put one copy back on the shelf and delete the record.
    ///
    /// Fails with `BookUpdateFailed` when the book is gone and with
    /// `RecordDeleteFailed` when the record is gone; neither leaves a change behind.
    async fn commit_return(&self, record: &BorrowRecord) -> AppResult<ReturnReceipt>;

    /// Connectivity check for readiness probes
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
    pub reference: reference::ReferenceRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            reference: reference::ReferenceRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl LibraryStore for Repository {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books.list().await
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.books.get_by_id(id).await
    }

    async fn books_by_category(&self, category: Option<String>) -> AppResult<Vec<Book>> {
        self.books.by_category(category.as_deref()).await
    }

    async fn insert_book(&self, info: BookInfo) -> AppResult<InsertResult> {
        self.books.insert(&info).await
    }

    async fn upsert_book(&self, id: Uuid, info: BookInfo) -> AppResult<UpdateResult> {
        self.books.upsert(id, &info).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.reference.categories().await
    }

    async fn list_writers(&self) -> AppResult<Vec<Writer>> {
        self.reference.writers().await
    }

    async fn find_borrow(&self, id: Uuid) -> AppResult<Option<BorrowRecord>> {
        self.borrows.get_by_id(id).await
    }

    async fn find_borrow_for(&self, book_id: Uuid, email: &str) -> AppResult<Option<BorrowRecord>> {
        self.borrows.find_for(book_id, email).await
    }

    async fn list_borrows(&self, email: &str) -> AppResult<Vec<BorrowRecord>> {
        self.borrows.list_for(email).await
    }

    async fn commit_borrow(&self, borrow: NewBorrow) -> AppResult<BorrowReceipt> {
        self.borrows.commit_borrow(&borrow).await
    }

    async fn commit_return(&self, record: &BorrowRecord) -> AppResult<ReturnReceipt> {
        self.borrows.commit_return(record).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
