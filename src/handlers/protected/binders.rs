use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::Principal;
use crate::handlers::{parse_listing, BOOLEAN_ATTRIBUTES};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Binder, BinderDraft, Card, EnrichedCard};

#[derive(Debug, Default, Deserialize)]
pub struct BinderCardsQuery {
    #[serde(default)]
    pub enriched: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BinderCards {
    Plain(Vec<Card>),
    Enriched(Vec<EnrichedCard>),
}

/// GET /me/binders - the caller's binders
///
/// Query keys filter by attribute (`is_favorite` parses as a boolean, values
/// that do not parse are ignored). `offset`/`limit` page the result. An
/// `owner_id` key has no effect: the list is always scoped to the caller.
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Binder>> {
    let (filter, page) = parse_listing(&state, &pairs, BOOLEAN_ATTRIBUTES)?;
    Ok(ApiResponse::success(state.binders.list(&principal, filter, page).await?))
}

/// POST /binders - create a binder owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<BinderDraft>, JsonRejection>,
) -> ApiResult<Binder> {
    let Json(draft) = payload?;
    Ok(ApiResponse::created(state.binders.create(&principal, draft).await?))
}

/// GET /binders/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Binder> {
    Ok(ApiResponse::success(state.binders.get(&principal, &id).await?))
}

/// PUT /binders/:id - replace name, description, image, type and favorite flag
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    payload: Result<Json<BinderDraft>, JsonRejection>,
) -> ApiResult<Binder> {
    let Json(draft) = payload?;
    Ok(ApiResponse::success(state.binders.update(&principal, &id, draft).await?))
}

/// DELETE /binders/:id - returns the removed binder
pub async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Binder> {
    Ok(ApiResponse::success(state.binders.delete(&principal, &id).await?))
}

/// GET /binders/:id/cards[?enriched=true] - cards in binder order
pub async fn cards(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    query: Result<Query<BinderCardsQuery>, QueryRejection>,
) -> ApiResult<BinderCards> {
    let Query(query) = query?;
    let cards = if query.enriched {
        BinderCards::Enriched(state.binders.enriched_cards(&principal, &id).await?)
    } else {
        BinderCards::Plain(state.binders.cards(&principal, &id).await?)
    };
    Ok(ApiResponse::success(cards))
}

/// PATCH /binders/:id/cards/:card_id - append a card
pub async fn add_card(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((id, card_id)): Path<(String, String)>,
) -> ApiResult<Binder> {
    Ok(ApiResponse::success(state.binders.add_card(&principal, &id, &card_id).await?))
}

/// DELETE /binders/:id/cards/:card_id - remove the first occurrence of a card
pub async fn remove_card(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((id, card_id)): Path<(String, String)>,
) -> ApiResult<Binder> {
    Ok(ApiResponse::success(state.binders.remove_card(&principal, &id, &card_id).await?))
}
