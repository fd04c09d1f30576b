use std::sync::Arc;

use tracing::{debug, info};

use crate::error::AppError;
use crate::listings::traits::ListingStore;
use crate::listings::types::{ListingCriteria, Pagination};
use crate::models::ListingPage;

/// Filtered, paginated listing search
#[derive(Clone)]
pub struct ListingQueryService {
    store: Arc<dyn ListingStore>,
}

impl ListingQueryService {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    /// Run `criteria` against the store and return one page plus the total match count
    pub async fn search(
        &self,
        criteria: &ListingCriteria,
        page: Pagination,
    ) -> Result<ListingPage, AppError> {
        debug!(?criteria, ?page, backend = self.store.backend_name(), "Searching listings");

        let total_count = self.store.count_listings(criteria).await?;
        // Nothing to fetch past the end of the filtered set
        let results = if page.offset >= total_count || page.limit == 0 {
            Vec::new()
        } else {
            self.store.find_listings(criteria, page).await?
        };

        info!(
            returned = results.len(),
            total_count,
            limit = page.limit,
            offset = page.offset,
            "Listing search complete"
        );

        Ok(ListingPage::new(results, total_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::memory::{HouseRecord, MemoryListingStore};

    fn house(id: i64, house_type: &str) -> HouseRecord {
        HouseRecord {
            id,
            name: format!("House {id}"),
            latitude: 1.0,
            longitude: 2.0,
            trap: "Pit".into(),
            exit: "Door".into(),
            max_guest: 4,
            house_type: house_type.into(),
            ghost: None,
            city: "Salem".into(),
            country: "USA".into(),
            owner: Some("Morticia".into()),
            images: vec![format!("https://img/{id}.png")],
            fear_ratings: vec![],
            reservations: vec![],
        }
    }

    fn service(houses: impl IntoIterator<Item = HouseRecord>) -> ListingQueryService {
        let store = houses
            .into_iter()
            .fold(MemoryListingStore::new(), MemoryListingStore::with_house);
        ListingQueryService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn total_count_ignores_the_page_window() {
        let service = service((1..=12).map(|id| house(id, "Mansion")));

        let page = service
            .search(&ListingCriteria::default(), Pagination { limit: 5, offset: 10 })
            .await
            .unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.total_pages, 12);
    }

    #[tokio::test]
    async fn offset_past_the_end_yields_an_empty_page() {
        let service = service([house(1, "Cabin")]);

        let page = service
            .search(&ListingCriteria::default(), Pagination { limit: 10, offset: 5 })
            .await
            .unwrap();

        assert!(page.results.is_empty());
        assert_eq!(page.total_count, 1);
    }

    #[tokio::test]
    async fn zero_matches_are_not_an_error() {
        let service = service([house(1, "Cabin")]);
        let criteria = ListingCriteria {
            house_types: vec!["Lighthouse".into()],
            ..Default::default()
        };

        let page = service.search(&criteria, Pagination::default()).await.unwrap();

        assert!(page.results.is_empty());
        assert_eq!(page.total_count, 0);
    }
}
