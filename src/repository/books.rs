//! Books repository for database operations

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookInfo},
        borrow::{InsertResult, UpdateResult},
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get all books, newest first
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Get books of a category (all books when no category is given)
    pub async fn by_category(&self, category: Option<&str>) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE ($1::TEXT IS NULL OR category = $1) ORDER BY created_at",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Insert a new book
    pub async fn insert(&self, info: &BookInfo) -> AppResult<InsertResult> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO books (id, name, category, img, description, quantity, rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&info.name)
        .bind(&info.category)
        .bind(&info.img)
        .bind(&info.description)
        .bind(info.quantity)
        .bind(info.rating)
        .fetch_one(&self.pool)
        .await?;

        Ok(InsertResult::inserted(id))
    }

    /// Set the editable fields of a book, inserting it if missing
    pub async fn upsert(&self, id: Uuid, info: &BookInfo) -> AppResult<UpdateResult> {
        // xmax is 0 only on a freshly inserted tuple
        let row = sqlx::query(
            r#"
            INSERT INTO books (id, name, category, img, description, quantity, rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                category = EXCLUDED.category,
                img = EXCLUDED.img,
                description = EXCLUDED.description,
                quantity = EXCLUDED.quantity,
                rating = EXCLUDED.rating
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(id)
        .bind(&info.name)
        .bind(&info.category)
        .bind(&info.img)
        .bind(&info.description)
        .bind(info.quantity)
        .bind(info.rating)
        .fetch_one(&self.pool)
        .await?;

        let inserted: bool = row.get("inserted");
        Ok(if inserted {
            UpdateResult::upserted(id)
        } else {
            UpdateResult::modified(1)
        })
    }
}
