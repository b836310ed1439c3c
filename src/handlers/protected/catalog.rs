use axum::extract::{rejection::JsonRejection, Path, State};
use axum::{Extension, Json};

use crate::app::AppState;
use crate::auth::Principal;
use crate::handlers::public::catalog::CatalogRoute;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /{groups,idols,collections,cards} - create; the id is always server-assigned
pub async fn create<T: CatalogRoute>(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    let Json(entry) = payload?;
    let created = T::catalog(&state).create(entry).await?;
    tracing::debug!("{} {} created by {}", T::KIND, created.id(), principal.user_id);
    Ok(ApiResponse::created(created))
}

/// PUT /{groups,idols,collections,cards}/:id - full replace of an existing entry
pub async fn update<T: CatalogRoute>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    let Json(entry) = payload?;
    Ok(ApiResponse::success(T::catalog(&state).update(&id, entry).await?))
}

/// DELETE /{groups,idols,collections,cards}/:id - returns the removed entry
pub async fn delete<T: CatalogRoute>(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<T> {
    Ok(ApiResponse::success(T::catalog(&state).delete(&id).await?))
}
