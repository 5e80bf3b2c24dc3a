//! Borrow record model and mutation acknowledgements

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::book::BookSnapshot;

/// Active loan of one book to one borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_info: BookSnapshot,
    pub email: String,
    pub borrowed_at: DateTime<Utc>,
    /// Due date chosen by the borrower
    pub return_date: Option<NaiveDate>,
}

/// Borrow record row from database
#[derive(Debug, FromRow)]
pub struct BorrowRecordRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_info: Json<BookSnapshot>,
    pub borrower_email: String,
    pub borrowed_at: DateTime<Utc>,
    pub return_date: Option<NaiveDate>,
}

impl From<BorrowRecordRow> for BorrowRecord {
    fn from(row: BorrowRecordRow) -> Self {
        Self {
            id: row.id,
            book_id: row.book_id,
            book_info: row.book_info.0,
            email: row.borrower_email,
            borrowed_at: row.borrowed_at,
            return_date: row.return_date,
        }
    }
}

/// Borrow request body as sent by the client
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowInfo {
    pub book_info: BookSnapshot,
    /// Borrower; defaults to the authenticated user
    pub email: Option<String>,
    pub return_date: Option<NaiveDate>,
}

/// `{ "borrowInfo": { ... } }` request envelope
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowPayload {
    pub borrow_info: BorrowInfo,
}

/// A checked borrow, ready to be committed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub snapshot: BookSnapshot,
    pub email: String,
    pub borrowed_at: DateTime<Utc>,
    pub return_date: Option<NaiveDate>,
}

impl NewBorrow {
    pub fn new(email: String, snapshot: BookSnapshot, return_date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            book_id: snapshot.id,
            snapshot,
            email,
            borrowed_at: Utc::now(),
            return_date,
        }
    }

    pub fn into_record(self) -> BorrowRecord {
        BorrowRecord {
            id: self.id,
            book_id: self.book_id,
            book_info: self.snapshot,
            email: self.email,
            borrowed_at: self.borrowed_at,
            return_date: self.return_date,
        }
    }
}

/// Borrowed-books filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BorrowedQuery {
    pub email: Option<String>,
}

/// Acknowledgement of a single-document insert
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

/// Acknowledgement of a single-document update
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Uuid>,
}

/// Acknowledgement of a single-document delete
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl InsertResult {
    pub fn inserted(id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id,
        }
    }
}

impl UpdateResult {
    /// One existing document matched and changed
    pub fn modified(count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count: count,
            modified_count: count,
            upserted_id: None,
        }
    }

    /// No document matched; one was inserted under `id`
    pub fn upserted(id: Uuid) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
        }
    }
}

impl DeleteResult {
    pub fn deleted(count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: count,
        }
    }
}

/// Result of a committed borrow
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowReceipt {
    pub insert_result: InsertResult,
    pub update_result: UpdateResult,
}

/// Result of a committed return
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceipt {
    pub update_result: UpdateResult,
    pub delete_result: DeleteResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_borrow_payload_from_client() {
        let book_id = Uuid::new_v4();
        let payload: BorrowPayload = serde_json::from_value(json!({
            "borrowInfo": {
                "bookInfo": { "_id": book_id, "name": "Dune", "category": "Sci-Fi", "quantity": 3 },
                "email": "a@x.com",
                "returnDate": "2026-11-01"
            }
        }))
        .unwrap();

        let info = payload.borrow_info;
        assert_eq!(info.book_info.id, book_id);
        assert_eq!(info.email.as_deref(), Some("a@x.com"));
        assert_eq!(info.return_date, NaiveDate::from_ymd_opt(2026, 11, 1));
    }

    #[test]
    fn test_receipt_wire_shape() {
        let id = Uuid::new_v4();
        let receipt = BorrowReceipt {
            insert_result: InsertResult::inserted(id),
            update_result: UpdateResult::modified(1),
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["insertResult"]["insertedId"], id.to_string());
        assert_eq!(json["updateResult"]["modifiedCount"], 1);
        assert!(json["updateResult"]["upsertedId"].is_null());
    }

    #[test]
    fn test_new_borrow_references_snapshot_book() {
        let snapshot = BookSnapshot {
            id: Uuid::new_v4(),
            name: "Dune".to_string(),
            category: "Sci-Fi".to_string(),
            img: None,
            description: None,
            quantity: Some(1),
            rating: None,
        };
        let borrow = NewBorrow::new("a@x.com".to_string(), snapshot.clone(), None);
        assert_eq!(borrow.book_id, snapshot.id);

        let record = borrow.clone().into_record();
        assert_eq!(record.id, borrow.id);
        assert_eq!(record.book_info, snapshot);
    }
}
