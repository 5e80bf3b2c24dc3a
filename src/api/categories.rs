//! Reference data endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::category::{Category, Writer},
    AppState,
};

/// List book categories
#[utoipa::path(
    get,
    path = "/books-categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// List writers
#[utoipa::path(
    get,
    path = "/writers",
    tag = "categories",
    responses(
        (status = 200, description = "All writers", body = Vec<Writer>)
    )
)]
pub async fn list_writers(State(state): State<AppState>) -> AppResult<Json<Vec<Writer>>> {
    let writers = state.services.catalog.list_writers().await?;
    Ok(Json(writers))
}
