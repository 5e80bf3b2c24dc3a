//! Catalog management service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookInfo},
        borrow::{InsertResult, UpdateResult},
        category::{Category, Writer},
    },
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn LibraryStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// All books, most recently added first
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.store.list_books().await
    }

    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.store
            .get_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn books_by_category(&self, category: Option<String>) -> AppResult<Vec<Book>> {
        // An empty `?category=` means no filter
        let category = category.filter(|c| !c.is_empty());
        self.store.books_by_category(category).await
    }

    pub async fn create_book(&self, info: BookInfo) -> AppResult<InsertResult> {
        info.validate()?;
        let result = self.store.insert_book(info).await?;
        tracing::info!(book_id = %result.inserted_id, "Book added to catalog");
        Ok(result)
    }

    pub async fn upsert_book(&self, id: Uuid, info: BookInfo) -> AppResult<UpdateResult> {
        info.validate()?;
        let result = self.store.upsert_book(id, info).await?;
        tracing::info!(book_id = %id, upserted = result.upserted_id.is_some(), "Book updated");
        Ok(result)
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.store.list_categories().await
    }

    pub async fn list_writers(&self) -> AppResult<Vec<Writer>> {
        self.store.list_writers().await
    }

    /// Store connectivity, for readiness checks
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    fn info(quantity: i32) -> BookInfo {
        BookInfo {
            name: "Dune".to_string(),
            category: "Sci-Fi".to_string(),
            img: None,
            description: None,
            quantity,
            rating: None,
        }
    }

    #[tokio::test]
    async fn test_get_unknown_book() {
        let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
        let result = catalog.get_book(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_quantity() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(Arc::new(store.clone()));

        let result = catalog.create_book(info(-2)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_category_lists_everything() {
        let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
        catalog.create_book(info(1)).await.unwrap();

        let books = catalog.books_by_category(Some(String::new())).await.unwrap();
        assert_eq!(books.len(), 1);
    }
}
