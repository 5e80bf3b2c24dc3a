//! Borrow and return endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowPayload, BorrowReceipt, BorrowRecord, BorrowedQuery, ReturnReceipt},
    AppState,
};

use super::AuthenticatedUser;

/// List the caller's borrowed books
#[utoipa::path(
    get,
    path = "/borrowed-books",
    tag = "lending",
    params(BorrowedQuery),
    responses(
        (status = 200, description = "Active borrow records", body = Vec<BorrowRecord>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Email is not the caller's", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrowed_books(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Query(query), _): WithRejection<Query<BorrowedQuery>, AppError>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let records = state
        .services
        .ledger
        .list_borrowed(&claims, query.email.as_deref())
        .await?;
    Ok(Json(records))
}

/// Borrow a book
#[utoipa::path(
    patch,
    path = "/borrowed",
    tag = "lending",
    request_body = BorrowPayload,
    responses(
        (status = 200, description = "Book borrowed", body = BorrowReceipt),
        (status = 400, description = "Already borrowed or out of stock", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Borrowing for another reader", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<BorrowPayload>, AppError>,
) -> AppResult<Json<BorrowReceipt>> {
    let receipt = state.services.ledger.borrow(&claims, payload.borrow_info).await?;
    Ok(Json(receipt))
}

/// Return a borrowed book
#[utoipa::path(
    patch,
    path = "/return-books/{id}",
    tag = "lending",
    params(
        ("id" = Uuid, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnReceipt),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Record belongs to another reader", body = crate::error::ErrorResponse),
        (status = 404, description = "Borrowed book not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Book or record could not be updated", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<Json<ReturnReceipt>> {
    let receipt = state.services.ledger.return_book(&claims, id).await?;
    Ok(Json(receipt))
}
