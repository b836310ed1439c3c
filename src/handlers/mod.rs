// Handlers are split by access tier:
// public (no token) and protected (bearer token, `Extension<Principal>` available).
pub mod protected;
pub mod public;

use crate::app::AppState;
use crate::error::ApiError;
use crate::filter::{Filter, Page, QueryParams};

/// Binder attributes that filter as booleans.
pub const BOOLEAN_ATTRIBUTES: &[&str] = &["is_favorite"];

/// Parses listing query pairs and caps the page at the configured maximum.
pub(crate) fn parse_listing(
    state: &AppState,
    pairs: &[(String, String)],
    boolean_attributes: &[&str],
) -> Result<(Filter, Page), ApiError> {
    let (filter, page) = QueryParams::new(boolean_attributes).parse(pairs)?;
    Ok((filter, page.capped(state.config.api.max_page_size)))
}
