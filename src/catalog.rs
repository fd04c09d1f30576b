use std::sync::Arc;

use crate::error::AppError;
use crate::listings::ListingStore;
use crate::models::{FilterOptions, Ghost, HouseType, OptionGroup};

/// Values a client can offer in its search filters
#[derive(Clone)]
pub struct OptionCatalog {
    store: Arc<dyn ListingStore>,
}

impl OptionCatalog {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    pub async fn get_options(&self) -> Result<FilterOptions, AppError> {
        let countries = self.store.country_names().await?;
        let cities = self.store.city_names().await?;

        Ok(FilterOptions {
            results: vec![
                OptionGroup::HouseType(HouseType::ALL.iter().map(|t| t.name().to_string()).collect()),
                OptionGroup::Ghost(Ghost::ALL.iter().map(|g| g.name().to_string()).collect()),
                OptionGroup::Country(countries),
                OptionGroup::City(cities),
            ],
        })
    }
}
