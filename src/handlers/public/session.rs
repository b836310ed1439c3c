use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::app::AppState;
use crate::auth::IssuedToken;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Credentials, Registration, UserView};

/// POST /auth/register - create an account
///
/// Body: `{"email", "username", "password", "image_url"?}`. Returns the public
/// user view; the password hash never leaves the server.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> ApiResult<UserView> {
    let Json(registration) = payload?;
    let user = state.users.register(registration).await?;
    Ok(ApiResponse::created(user))
}

/// POST /auth/login - exchange email and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<IssuedToken> {
    let Json(credentials) = payload?;
    let token = state.users.login(credentials).await?;
    Ok(ApiResponse::success(token))
}
