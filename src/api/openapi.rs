//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrows, categories, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nexus Library API",
        version = "1.0.0",
        description = "Book lending REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Session
        auth::issue_token,
        auth::logout,
        // Books
        books::list_books,
        books::get_book,
        books::category_books,
        books::add_book,
        books::update_book,
        // Reference data
        categories::list_categories,
        categories::list_writers,
        // Lending
        borrows::borrowed_books,
        borrows::borrow_book,
        borrows::return_book,
    ),
    components(
        schemas(
            // Session
            auth::SessionResponse,
            crate::models::user::TokenRequest,
            // Books
            crate::models::book::Book,
            crate::models::book::BookInfo,
            crate::models::book::BookPayload,
            crate::models::book::BookSnapshot,
            crate::models::category::Category,
            crate::models::category::Writer,
            // Lending
            crate::models::borrow::BorrowRecord,
            crate::models::borrow::BorrowInfo,
            crate::models::borrow::BorrowPayload,
            crate::models::borrow::BorrowReceipt,
            crate::models::borrow::ReturnReceipt,
            crate::models::borrow::InsertResult,
            crate::models::borrow::UpdateResult,
            crate::models::borrow::DeleteResult,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Session cookie endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "categories", description = "Categories and writers"),
        (name = "lending", description = "Borrow and return")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_lending_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/borrowed"));
        assert!(paths.iter().any(|p| p.as_str() == "/return-books/{id}"));
    }
}
