//! Lending ledger: borrow and return with stock-consistency checks.
//!
//! A borrow moves one copy of a book from the shelf to a borrower and records
//! it; a return reverses both effects. The ledger guarantees that
//!
//! - stock is only taken when at least one copy is on the shelf,
//! - a borrower holds at most one copy of a given book,
//! - the record and the stock change are committed together.
//!
//! Checks and commit for one book run under a per-book async mutex, so two
//! requests for the same book never interleave inside this process. The
//! store re-checks inside its atomic commit, which covers several server
//! processes sharing one database.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{BorrowInfo, BorrowReceipt, BorrowRecord, NewBorrow, ReturnReceipt},
        user::UserClaims,
    },
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LibraryStore>,
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self {
            store,
            locks: Arc::new(DashMap::new()),
        }
    }

    async fn lock_book(&self, book_id: Uuid) -> BookLock {
        let lock = self.locks.entry(book_id).or_default().clone();
        let guard = lock.lock_owned().await;
        BookLock {
            locks: Arc::clone(&self.locks),
            book_id,
            guard: Some(guard),
        }
    }

    /// Borrow one copy of a book for the caller
    pub async fn borrow(&self, caller: &UserClaims, info: BorrowInfo) -> AppResult<BorrowReceipt> {
        let email = match info.email {
            Some(email) => {
                caller.require_email(&email)?;
                email
            }
            None => caller.email.clone(),
        };
        let book_id = info.book_info.id;

        let _lock = self.lock_book(book_id).await;

        if self.store.find_borrow_for(book_id, &email).await?.is_some() {
            tracing::warn!(%book_id, borrower = %email, "Borrow rejected: already borrowed");
            return Err(AppError::AlreadyBorrowed);
        }

        match self.store.get_book(book_id).await? {
            Some(book) if book.quantity > 0 => {}
            _ => {
                tracing::warn!(%book_id, borrower = %email, "Borrow rejected: out of stock");
                return Err(AppError::OutOfStock);
            }
        }

        let borrow = NewBorrow::new(email, info.book_info, info.return_date);
        let record_id = borrow.id;
        let receipt = self.store.commit_borrow(borrow).await?;

        tracing::info!(%book_id, %record_id, borrower = %caller.email, "Book borrowed");
        Ok(receipt)
    }

    /// Return a borrowed book and release the record
    pub async fn return_book(&self, caller: &UserClaims, record_id: Uuid) -> AppResult<ReturnReceipt> {
        let record = self
            .store
            .find_borrow(record_id)
            .await?
            .ok_or(AppError::RecordNotFound)?;
        caller.require_email(&record.email)?;

        let _lock = self.lock_book(record.book_id).await;

        // A concurrent return of the same record may have won the lock
        let record = self
            .store
            .find_borrow(record_id)
            .await?
            .ok_or(AppError::RecordNotFound)?;

        let receipt = self.store.commit_return(&record).await.map_err(|e| {
            tracing::error!(book_id = %record.book_id, %record_id, "Return failed: {}", e);
            e
        })?;

        tracing::info!(book_id = %record.book_id, %record_id, borrower = %caller.email, "Book returned");
        Ok(receipt)
    }

    /// Active records of `email`; readers may only list their own
    pub async fn list_borrowed(
        &self,
        caller: &UserClaims,
        email: Option<&str>,
    ) -> AppResult<Vec<BorrowRecord>> {
        let email = email.unwrap_or_default();
        caller.require_email(email)?;
        self.store.list_borrows(email).await
    }
}

/// Held per-book mutex. Dropping it releases the mutex and evicts the map
/// entry once no other task holds or waits on it.
struct BookLock {
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
    book_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for BookLock {
    fn drop(&mut self) {
        self.guard.take();
        self.locks
            .remove_if(&self.book_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
