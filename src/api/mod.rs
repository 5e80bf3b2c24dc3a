//! API handlers for Nexus REST endpoints

pub mod auth;
pub mod books;
pub mod borrows;
pub mod categories;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, Method},
    routing::{get, patch, post, put},
    Router,
};
use axum_extra::extract::CookieJar;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::CorsConfig, error::AppError, models::user::UserClaims, AppState};

/// Name of the cookie carrying the identity token
pub const TOKEN_COOKIE: &str = "token";

/// Extractor for the authenticated reader from the session cookie
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Authentication("Unauthorized!".to_string()))?;

        let claims = state.services.auth.verify_token(&token)?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Session
        .route("/jwt", post(auth::issue_token))
        .route("/logout", post(auth::logout))
        // Catalog
        .route("/all-books", get(books::list_books))
        .route("/all-books/:id", get(books::get_book))
        .route("/category-books", get(books::category_books))
        .route("/add-book", post(books::add_book))
        .route("/update/:id", put(books::update_book))
        .route("/books-categories", get(categories::list_categories))
        .route("/writers", get(categories::list_writers))
        // Lending
        .route("/borrowed-books", get(borrows::borrowed_books))
        .route("/borrowed", patch(borrows::borrow_book))
        .route("/return-books/:id", patch(borrows::return_book))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the configured front-end origins; the session cookie needs credentials
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
