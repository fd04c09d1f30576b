use axum::{extract::State, Json};

use crate::error::AppError;
use crate::models::FilterOptions;
use crate::server::app::AppState;

/// `GET /options`: house types, ghosts, countries and cities for filter menus
pub async fn options_handler(State(state): State<AppState>) -> Result<Json<FilterOptions>, AppError> {
    let options = state.catalog.get_options().await?;
    Ok(Json(options))
}
