pub mod memory;
pub mod postgres;
pub mod service;
pub mod traits;
pub mod types;

pub use memory::{HouseRecord, MemoryListingStore, ReservationRecord};
pub use postgres::PgListingStore;
pub use service::ListingQueryService;
pub use traits::ListingStore;
pub use types::{AvailabilityRule, ListingCriteria, ListingQuery, Pagination, StayWindow};
