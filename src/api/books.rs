//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookPayload, CategoryQuery},
        borrow::{InsertResult, UpdateResult},
    },
    AppState,
};

use super::AuthenticatedUser;

/// List all books, most recently added first
#[utoipa::path(
    get,
    path = "/all-books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/all-books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// List books of a category
#[utoipa::path(
    get,
    path = "/category-books",
    tag = "books",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Books in the category", body = Vec<Book>)
    )
)]
pub async fn category_books(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CategoryQuery>, AppError>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.books_by_category(query.category).await?;
    Ok(Json(books))
}

/// Add a new book to the catalog
#[utoipa::path(
    post,
    path = "/add-book",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book added", body = InsertResult),
        (status = 400, description = "Invalid book", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<Json<InsertResult>> {
    tracing::debug!(user = %claims.email, "Adding book");
    let result = state.services.catalog.create_book(payload.book_info).await?;
    Ok(Json(result))
}

/// Update a book's editable fields, creating it if missing
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated or inserted", body = UpdateResult),
        (status = 400, description = "Invalid book", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<Json<UpdateResult>> {
    tracing::debug!(user = %claims.email, book_id = %id, "Updating book");
    let result = state.services.catalog.upsert_book(id, payload.book_info).await?;
    Ok(Json(result))
}
