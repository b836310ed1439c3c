use axum::extract::{rejection::JsonRejection, Path, State};
use axum::{Extension, Json};

use crate::app::AppState;
use crate::auth::{IssuedToken, Principal};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{UserChanges, UserView};

/// GET /me - the authenticated user
pub async fn me(State(state): State<AppState>, Extension(principal): Extension<Principal>) -> ApiResult<UserView> {
    Ok(ApiResponse::success(state.users.me(&principal).await?))
}

/// POST /auth/refresh - fresh token for the caller
pub async fn refresh(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<IssuedToken> {
    Ok(ApiResponse::success(state.users.refresh(&principal).await?))
}

/// GET /users/:id
pub async fn user_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserView> {
    Ok(ApiResponse::success(state.users.get(&id).await?))
}

/// PUT /users/:id - replace profile fields; only the user themself may do this
pub async fn user_update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    payload: Result<Json<UserChanges>, JsonRejection>,
) -> ApiResult<UserView> {
    let Json(changes) = payload?;
    Ok(ApiResponse::success(state.users.update(&principal, &id, changes).await?))
}
