//! Borrow records repository for database operations

use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{
        BorrowReceipt, BorrowRecord, BorrowRecordRow, DeleteResult, InsertResult, NewBorrow,
        ReturnReceipt, UpdateResult,
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BorrowRecord>> {
        let row = sqlx::query_as::<_, BorrowRecordRow>("SELECT * FROM borrowed_books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Get the active record of a borrower for a book
    pub async fn find_for(&self, book_id: Uuid, email: &str) -> AppResult<Option<BorrowRecord>> {
        let row = sqlx::query_as::<_, BorrowRecordRow>(
            "SELECT * FROM borrowed_books WHERE book_id = $1 AND borrower_email = $2",
        )
        .bind(book_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    /// Get all records of a borrower
    pub async fn list_for(&self, email: &str) -> AppResult<Vec<BorrowRecord>> {
        let rows = sqlx::query_as::<_, BorrowRecordRow>(
            "SELECT * FROM borrowed_books WHERE borrower_email = $1 ORDER BY borrowed_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a borrow record and decrement stock in one transaction
    pub async fn commit_borrow(&self, borrow: &NewBorrow) -> AppResult<BorrowReceipt> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent borrows of the same book across processes
        let quantity: Option<i32> =
            sqlx::query_scalar("SELECT quantity FROM books WHERE id = $1 FOR UPDATE")
                .bind(borrow.book_id)
                .fetch_optional(&mut *tx)
                .await?;

        let already_borrowed: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrowed_books WHERE book_id = $1 AND borrower_email = $2)",
        )
        .bind(borrow.book_id)
        .bind(&borrow.email)
        .fetch_one(&mut *tx)
        .await?;

        if already_borrowed {
            return Err(AppError::AlreadyBorrowed);
        }

        if !matches!(quantity, Some(q) if q > 0) {
            return Err(AppError::OutOfStock);
        }

        let inserted_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO borrowed_books (id, book_id, book_info, borrower_email, borrowed_at, return_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(borrow.id)
        .bind(borrow.book_id)
        .bind(Json(&borrow.snapshot))
        .bind(&borrow.email)
        .bind(borrow.borrowed_at)
        .bind(borrow.return_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::AlreadyBorrowed,
            other => AppError::Database(other),
        })?;

        let updated = sqlx::query("UPDATE books SET quantity = quantity - 1 WHERE id = $1 AND quantity > 0")
            .bind(borrow.book_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::OutOfStock);
        }

        tx.commit().await?;

        Ok(BorrowReceipt {
            insert_result: InsertResult::inserted(inserted_id),
            update_result: UpdateResult::modified(updated),
        })
    }

    /// Increment stock and delete the borrow record in one transaction
    pub async fn commit_return(&self, record: &BorrowRecord) -> AppResult<ReturnReceipt> {
        let mut tx = self.pool.begin().await?;

        // Stock already at i32::MAX cannot take the copy back
        let updated = sqlx::query(
            "UPDATE books SET quantity = quantity + 1 WHERE id = $1 AND quantity < $2",
        )
            .bind(record.book_id)
            .bind(i32::MAX)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::BookUpdateFailed);
        }

        let deleted = sqlx::query("DELETE FROM borrowed_books WHERE id = $1")
            .bind(record.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::RecordDeleteFailed);
        }

        tx.commit().await?;

        Ok(ReturnReceipt {
            update_result: UpdateResult::modified(updated),
            delete_result: DeleteResult::deleted(deleted),
        })
    }
}
