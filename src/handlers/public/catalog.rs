use axum::extract::{Path, Query, State};

use crate::app::AppState;
use crate::handlers::parse_listing;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Card, Collection, Group, Idol};
use crate::services::{CatalogEntry, CatalogService};

/// Resolves the catalog service for an entry type out of the shared state.
pub trait CatalogRoute: CatalogEntry {
    fn catalog(state: &AppState) -> &CatalogService<Self>;
}

impl CatalogRoute for Group {
    fn catalog(state: &AppState) -> &CatalogService<Self> {
        &state.groups
    }
}

impl CatalogRoute for Idol {
    fn catalog(state: &AppState) -> &CatalogService<Self> {
        &state.idols
    }
}

impl CatalogRoute for Collection {
    fn catalog(state: &AppState) -> &CatalogService<Self> {
        &state.collections
    }
}

impl CatalogRoute for Card {
    fn catalog(state: &AppState) -> &CatalogService<Self> {
        &state.card_catalog
    }
}

/// GET /{groups,idols,collections,cards} - list, optionally filtered and paged
///
/// Any query key other than `offset`/`limit` is an attribute filter; repeat a
/// key to accept several values.
pub async fn list<T: CatalogRoute>(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<T>> {
    let service = T::catalog(&state);
    let entries = if pairs.is_empty() {
        service.list().await?
    } else {
        let (filter, page) = parse_listing(&state, &pairs, &[])?;
        service.search(&filter, page).await?
    };
    Ok(ApiResponse::success(entries))
}

/// GET /{groups,idols,collections}/:id
pub async fn get<T: CatalogRoute>(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<T> {
    let entry = T::catalog(&state).get(&id).await?;
    Ok(ApiResponse::success(entry))
}
