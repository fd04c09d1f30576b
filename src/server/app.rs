//! Application setup and router construction.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::catalog::OptionCatalog;
use crate::listings::{AvailabilityRule, ListingQueryService, ListingStore};
use crate::server::routes::{health_handler, houses_handler, options_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub listings: ListingQueryService,
    pub catalog: OptionCatalog,
    pub store: Arc<dyn ListingStore>,
    pub availability_rule: AvailabilityRule,
    pub max_page_size: i64,
}

impl AppState {
    pub fn new(store: Arc<dyn ListingStore>, availability_rule: AvailabilityRule, max_page_size: i64) -> Self {
        Self {
            listings: ListingQueryService::new(store.clone()),
            catalog: OptionCatalog::new(store.clone()),
            store,
            availability_rule,
            max_page_size,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/options", get(options_handler))
        .route("/houses", get(houses_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
