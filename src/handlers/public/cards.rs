use axum::extract::{Path, State};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::EnrichedCard;

/// GET /cards/:id - card joined with its group, idols and collection
pub async fn get_enriched(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<EnrichedCard> {
    let card = state.cards.get_enriched(&id).await?;
    Ok(ApiResponse::success(card))
}
