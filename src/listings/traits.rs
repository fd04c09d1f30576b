use crate::listings::types::{ListingCriteria, Pagination};
use crate::models::ListingSummary;
use anyhow::Result;
use async_trait::async_trait;

/// Read access to the house catalog.
/// Implemented by Postgres in production and by an in-memory store in tests.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Distinct country names, ordered by name
    async fn country_names(&self) -> Result<Vec<String>>;

    /// Distinct city names, ordered by name
    async fn city_names(&self) -> Result<Vec<String>>;

    /// One page of listings matching `criteria`, ordered by house id
    async fn find_listings(
        &self,
        criteria: &ListingCriteria,
        page: Pagination,
    ) -> Result<Vec<ListingSummary>>;

    /// Number of houses matching `criteria`, ignoring pagination
    async fn count_listings(&self, criteria: &ListingCriteria) -> Result<i64>;

    /// Cheap round-trip used by the health check
    async fn ping(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}
