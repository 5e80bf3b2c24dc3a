//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub img: Option<String>,
    pub description: Option<String>,
    /// Copies currently on the shelf; never negative
    pub quantity: i32,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Editable fields of a book, as sent by the client for add and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookInfo {
    #[validate(length(min = 1, message = "Book name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub img: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
}

/// `{ "bookInfo": { ... } }` request envelope
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub book_info: BookInfo,
}

impl Book {
    /// Build a new catalog entry from client-supplied fields
    pub fn from_info(id: Uuid, info: BookInfo) -> Self {
        Self {
            id,
            name: info.name,
            category: info.category,
            img: info.img,
            description: info.description,
            quantity: info.quantity,
            rating: info.rating,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the editable fields, keeping identity and creation time
    pub fn apply(&mut self, info: BookInfo) {
        self.name = info.name;
        self.category = info.category;
        self.img = info.img;
        self.description = info.description;
        self.quantity = info.quantity;
        self.rating = info.rating;
    }
}

/// Book data embedded in a borrow record, frozen at borrow time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSnapshot {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl From<&Book> for BookSnapshot {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            name: book.name.clone(),
            category: book.category.clone(),
            img: book.img.clone(),
            description: book.description.clone(),
            quantity: Some(book.quantity),
            rating: book.rating,
        }
    }
}

/// Category filter for `/category-books`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(quantity: i32, rating: Option<f64>) -> BookInfo {
        BookInfo {
            name: "Dune".to_string(),
            category: "Sci-Fi".to_string(),
            img: None,
            description: None,
            quantity,
            rating,
        }
    }

    #[test]
    fn test_book_info_validation() {
        assert!(info(3, Some(4.5)).validate().is_ok());
        assert!(info(-1, None).validate().is_err());
        assert!(info(1, Some(7.0)).validate().is_err());
    }

    #[test]
    fn test_book_serializes_with_document_id() {
        let book = Book::from_info(Uuid::new_v4(), info(2, None));
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["_id"], book.id.to_string());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_snapshot_accepts_partial_book() {
        let id = Uuid::new_v4();
        let snapshot: BookSnapshot =
            serde_json::from_value(serde_json::json!({ "_id": id, "name": "Dune" })).unwrap();
        assert_eq!(snapshot.id, id);
        assert_eq!(snapshot.quantity, None);
    }
}
