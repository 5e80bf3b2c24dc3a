//! In-memory store.
//!
//! Used with `database.backend = "memory"` for local development, and by the
//! test suites. All collections live behind one [`parking_lot::RwLock`], so
//! each `commit_*` call applies both of its mutations under a single write
//! guard. Data is lost when the process exits.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use uuid::Uuid;

use super::LibraryStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookInfo},
        borrow::{
            BorrowReceipt, BorrowRecord, DeleteResult, InsertResult, NewBorrow, ReturnReceipt,
            UpdateResult,
        },
        category::{Category, Writer},
    },
};

#[derive(Default)]
struct Collections {
    /// Insertion order is the catalog's "added" order
    books: IndexMap<Uuid, Book>,
    categories: Vec<Category>,
    writers: Vec<Writer>,
    borrows: HashMap<Uuid, BorrowRecord>,
}

/// Process-local [`LibraryStore`]. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a book straight into the catalog
    pub fn seed_book(&self, book: Book) {
        self.data.write().books.insert(book.id, book);
    }

    pub fn seed_category(&self, category: Category) {
        self.data.write().categories.push(category);
    }

    pub fn seed_writer(&self, writer: Writer) {
        self.data.write().writers.push(writer);
    }

    /// Drop a book from the catalog, leaving its borrow records in place
    pub fn remove_book(&self, id: Uuid) -> Option<Book> {
        self.data.write().books.shift_remove(&id)
    }

    /// Number of active records, across all borrowers
    pub fn borrow_count(&self) -> usize {
        self.data.read().borrows.len()
    }
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.data.read().books.values().rev().cloned().collect())
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.data.read().books.get(&id).cloned())
    }

    async fn books_by_category(&self, category: Option<String>) -> AppResult<Vec<Book>> {
        let data = self.data.read();
        Ok(data
            .books
            .values()
            .filter(|b| category.as_ref().map_or(true, |c| &b.category == c))
            .cloned()
            .collect())
    }

    async fn insert_book(&self, info: BookInfo) -> AppResult<InsertResult> {
        let book = Book::from_info(Uuid::new_v4(), info);
        let id = book.id;
        self.data.write().books.insert(id, book);
        Ok(InsertResult::inserted(id))
    }

    async fn upsert_book(&self, id: Uuid, info: BookInfo) -> AppResult<UpdateResult> {
        let mut data = self.data.write();
        match data.books.get_mut(&id) {
            Some(book) => {
                book.apply(info);
                Ok(UpdateResult::modified(1))
            }
            None => {
                data.books.insert(id, Book::from_info(id, info));
                Ok(UpdateResult::upserted(id))
            }
        }
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.data.read().categories.clone())
    }

    async fn list_writers(&self) -> AppResult<Vec<Writer>> {
        Ok(self.data.read().writers.clone())
    }

    async fn find_borrow(&self, id: Uuid) -> AppResult<Option<BorrowRecord>> {
        Ok(self.data.read().borrows.get(&id).cloned())
    }

    async fn find_borrow_for(&self, book_id: Uuid, email: &str) -> AppResult<Option<BorrowRecord>> {
        Ok(self
            .data
            .read()
            .borrows
            .values()
            .find(|r| r.book_id == book_id && r.email == email)
            .cloned())
    }

    async fn list_borrows(&self, email: &str) -> AppResult<Vec<BorrowRecord>> {
        let data = self.data.read();
        let mut records: Vec<BorrowRecord> = data
            .borrows
            .values()
            .filter(|r| r.email == email)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.borrowed_at);
        Ok(records)
    }

    async fn commit_borrow(&self, borrow: NewBorrow) -> AppResult<BorrowReceipt> {
        let mut data = self.data.write();

        if data
            .borrows
            .values()
            .any(|r| r.book_id == borrow.book_id && r.email == borrow.email)
        {
            return Err(AppError::AlreadyBorrowed);
        }

        let book = data
            .books
            .get_mut(&borrow.book_id)
            .filter(|b| b.quantity > 0)
            .ok_or(AppError::OutOfStock)?;
        book.quantity -= 1;

        let id = borrow.id;
        data.borrows.insert(id, borrow.into_record());

        Ok(BorrowReceipt {
            insert_result: InsertResult::inserted(id),
            update_result: UpdateResult::modified(1),
        })
    }

    async fn commit_return(&self, record: &BorrowRecord) -> AppResult<ReturnReceipt> {
        let mut data = self.data.write();

        let restored = data
            .books
            .get(&record.book_id)
            .and_then(|book| book.quantity.checked_add(1))
            .ok_or(AppError::BookUpdateFailed)?;
        if !data.borrows.contains_key(&record.id) {
            return Err(AppError::RecordDeleteFailed);
        }

        if let Some(book) = data.books.get_mut(&record.book_id) {
            book.quantity = restored;
        }
        data.borrows.remove(&record.id);

        Ok(ReturnReceipt {
            update_result: UpdateResult::modified(1),
            delete_result: DeleteResult::deleted(1),
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
