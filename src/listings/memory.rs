use crate::listings::traits::ListingStore;
use crate::listings::types::{ListingCriteria, Pagination};
use crate::models::ListingSummary;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRecord {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// A house with its associations already resolved
#[derive(Debug, Clone)]
pub struct HouseRecord {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub trap: String,
    pub exit: String,
    pub max_guest: i64,
    pub house_type: String,
    pub ghost: Option<String>,
    pub city: String,
    pub country: String,
    pub owner: Option<String>,
    pub images: Vec<String>,
    pub fear_ratings: Vec<f64>,
    pub reservations: Vec<ReservationRecord>,
}

impl HouseRecord {
    fn matches(&self, criteria: &ListingCriteria) -> bool {
        fn in_set(values: &[String], value: &str) -> bool {
            values.is_empty() || values.iter().any(|v| v == value)
        }

        let ghost_ok = criteria.ghosts.is_empty()
            || self
                .ghost
                .as_deref()
                .is_some_and(|ghost| in_set(&criteria.ghosts, ghost));

        let available = criteria.stay.map_or(true, |stay| {
            !self
                .reservations
                .iter()
                .any(|r| stay.conflicts_with(r.check_in, r.check_out))
        });

        in_set(&criteria.house_types, &self.house_type)
            && ghost_ok
            && in_set(&criteria.countries, &self.country)
            && in_set(&criteria.cities, &self.city)
            && criteria.trap.as_ref().map_or(true, |trap| *trap == self.trap)
            && criteria.exit.as_ref().map_or(true, |exit| *exit == self.exit)
            && criteria.headcount.map_or(true, |headcount| self.max_guest < headcount)
            && available
    }

    fn summary(&self) -> ListingSummary {
        let review_average = if self.fear_ratings.is_empty() {
            None
        } else {
            Some(self.fear_ratings.iter().sum::<f64>() / self.fear_ratings.len() as f64)
        };

        ListingSummary {
            house_id: self.id,
            name: self.name.clone(),
            images: self.images.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            user_name: self.owner.clone(),
            review_average,
            review_count: self.fear_ratings.len() as i64,
            trap: self.trap.clone(),
            exit: self.exit.clone(),
            ghost: self.ghost.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            house_type: self.house_type.clone(),
        }
    }
}

/// Listing store held entirely in memory.
///
/// Countries and cities are stored separately from houses so an empty
/// catalog can still list places.
#[derive(Debug, Clone, Default)]
pub struct MemoryListingStore {
    houses: Vec<HouseRecord>,
    countries: Vec<String>,
    cities: Vec<String>,
}

impl MemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a house, registering its city and country as well
    pub fn with_house(mut self, house: HouseRecord) -> Self {
        self.countries.push(house.country.clone());
        self.cities.push(house.city.clone());
        self.houses.push(house);
        self.houses.sort_by_key(|h| h.id);
        self
    }

    pub fn with_place(mut self, country: &str, city: &str) -> Self {
        self.countries.push(country.to_string());
        self.cities.push(city.to_string());
        self
    }

    fn matching<'a>(&'a self, criteria: &'a ListingCriteria) -> impl Iterator<Item = &'a HouseRecord> + 'a {
        self.houses.iter().filter(move |h| h.matches(criteria))
    }
}

fn distinct_sorted(names: &[String]) -> Vec<String> {
    names
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn country_names(&self) -> Result<Vec<String>> {
        Ok(distinct_sorted(&self.countries))
    }

    async fn city_names(&self) -> Result<Vec<String>> {
        Ok(distinct_sorted(&self.cities))
    }

    async fn find_listings(
        &self,
        criteria: &ListingCriteria,
        page: Pagination,
    ) -> Result<Vec<ListingSummary>> {
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(0);

        Ok(self
            .matching(criteria)
            .skip(offset)
            .take(limit)
            .map(HouseRecord::summary)
            .collect())
    }

    async fn count_listings(&self, criteria: &ListingCriteria) -> Result<i64> {
        Ok(self.matching(criteria).count() as i64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
