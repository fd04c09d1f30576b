use crate::listings::traits::ListingStore;
use crate::listings::types::{AvailabilityRule, ListingCriteria, Pagination};
use crate::models::ListingSummary;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

static LISTING_COLUMNS: &str = r#"
    SELECT
        h.id AS house_id,
        h.name,
        h.latitude,
        h.longitude,
        h.trap,
        h.exit,
        u.name AS user_name,
        g.name AS ghost,
        c.name AS city,
        co.name AS country,
        ht.name AS house_type,
        COALESCE(
            (SELECT array_agg(hi.image_url ORDER BY hi.id) FROM house_images hi WHERE hi.house_id = h.id),
            ARRAY[]::text[]
        ) AS images,
        (SELECT AVG(r.fear_rating)::float8 FROM reviews r WHERE r.house_id = h.id) AS review_average,
        (SELECT COUNT(r.fear_rating) FROM reviews r WHERE r.house_id = h.id) AS review_count
"#;

static COUNT_COLUMNS: &str = "SELECT COUNT(*)";

// Every join is many-to-one, so one row per house.
static FROM_HOUSES: &str = r#"
    FROM houses h
    JOIN cities c ON c.id = h.city_id
    JOIN countries co ON co.id = c.country_id
    JOIN house_types ht ON ht.id = h.house_type_id
    LEFT JOIN ghosts g ON g.id = h.ghost_id
    LEFT JOIN users u ON u.id = h.user_id
"#;

/// Postgres-backed listing store
#[derive(Clone)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ListingRow {
    house_id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
    trap: String,
    exit: String,
    user_name: Option<String>,
    ghost: Option<String>,
    city: String,
    country: String,
    house_type: String,
    images: Vec<String>,
    review_average: Option<f64>,
    review_count: i64,
}

impl From<ListingRow> for ListingSummary {
    fn from(row: ListingRow) -> Self {
        ListingSummary {
            house_id: row.house_id,
            name: row.name,
            images: row.images,
            latitude: row.latitude,
            longitude: row.longitude,
            user_name: row.user_name,
            review_average: row.review_average,
            review_count: row.review_count,
            trap: row.trap,
            exit: row.exit,
            ghost: row.ghost,
            city: row.city,
            country: row.country,
            house_type: row.house_type,
        }
    }
}

/// Append the WHERE clause for `criteria`. All values are bound.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, criteria: &ListingCriteria) {
    builder.push(" WHERE TRUE");

    let name_sets = [
        ("ht.name", &criteria.house_types),
        ("g.name", &criteria.ghosts),
        ("co.name", &criteria.countries),
        ("c.name", &criteria.cities),
    ];
    for (column, values) in name_sets {
        if !values.is_empty() {
            builder
                .push(format!(" AND {column} = ANY("))
                .push_bind(values.clone())
                .push(")");
        }
    }

    if let Some(trap) = &criteria.trap {
        builder.push(" AND h.trap = ").push_bind(trap.clone());
    }
    if let Some(exit) = &criteria.exit {
        builder.push(" AND h.exit = ").push_bind(exit.clone());
    }
    if let Some(headcount) = criteria.headcount {
        builder.push(" AND h.max_guest < ").push_bind(headcount);
    }

    if let Some(stay) = &criteria.stay {
        builder.push(
            " AND NOT EXISTS (SELECT 1 FROM reservations rv WHERE rv.house_id = h.id AND ",
        );
        match stay.rule {
            AvailabilityRule::Overlap => {
                builder
                    .push("rv.check_in < ")
                    .push_bind(stay.check_out)
                    .push(" AND rv.check_out > ")
                    .push_bind(stay.check_in);
            }
            AvailabilityRule::Legacy => {
                builder
                    .push("rv.check_in > ")
                    .push_bind(stay.check_in)
                    .push(" AND rv.check_in <= ")
                    .push_bind(stay.check_out);
            }
        }
        builder.push(")");
    }
}

fn build_listing_query(criteria: &ListingCriteria, page: Pagination) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(LISTING_COLUMNS);
    builder.push(FROM_HOUSES);
    push_filters(&mut builder, criteria);
    builder
        .push(" ORDER BY h.id LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);
    builder
}

fn build_count_query(criteria: &ListingCriteria) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(COUNT_COLUMNS);
    builder.push(FROM_HOUSES);
    push_filters(&mut builder, criteria);
    builder
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn country_names(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT name FROM countries ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load country names")
    }

    async fn city_names(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT name FROM cities ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load city names")
    }

    async fn find_listings(
        &self,
        criteria: &ListingCriteria,
        page: Pagination,
    ) -> Result<Vec<ListingSummary>> {
        let mut builder = build_listing_query(criteria, page);
        debug!(sql = builder.sql(), "Fetching listing page");

        let rows = builder
            .build_query_as::<ListingRow>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch listings")?;

        Ok(rows.into_iter().map(ListingSummary::from).collect())
    }

    async fn count_listings(&self, criteria: &ListingCriteria) -> Result<i64> {
        let mut builder = build_count_query(criteria);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .context("Failed to count listings")
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
