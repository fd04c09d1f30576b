use axum::{
    extract::{RawQuery, State},
    Json,
};

use crate::error::AppError;
use crate::listings::ListingQuery;
use crate::models::ListingPage;
use crate::server::app::AppState;

/// `GET /houses`: filtered, paginated listing search
///
/// The query string is decoded by hand because list filters repeat
/// (`?city=Salem&city=Bran`), which axum's `Query` extractor rejects.
pub async fn houses_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ListingPage>, AppError> {
    let (criteria, page) = ListingQuery::parse(raw.as_deref())?
        .into_search(state.availability_rule, state.max_page_size)?;

    let listings = state.listings.search(&criteria, page).await?;
    Ok(Json(listings))
}
