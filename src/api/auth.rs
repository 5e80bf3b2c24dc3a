//! Session cookie endpoints

use axum::{extract::State, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar, WithRejection,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    config::{AuthConfig, SameSitePolicy},
    error::{AppError, AppResult},
    models::user::TokenRequest,
    AppState,
};

use super::TOKEN_COOKIE;

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
}

fn session_cookie(config: &AuthConfig, value: String) -> Cookie<'static> {
    let same_site = match config.cookie_same_site {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    };

    Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site)
        .build()
}

/// Issue a signed identity token as an http-only cookie
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Cookie set", body = SessionResponse),
        (status = 400, description = "Invalid email", body = crate::error::ErrorResponse)
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<TokenRequest>, AppError>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    request.validate()?;

    let token = state.services.auth.issue_token(&request.email)?;
    let cookie = session_cookie(&state.config.auth, token);

    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}

/// Clear the identity cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Cookie cleared", body = SessionResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    let cookie = session_cookie(&state.config.auth, String::new());
    (jar.remove(cookie), Json(SessionResponse { success: true }))
}
