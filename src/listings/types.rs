use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

/// How a requested stay is checked against existing reservations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityRule {
    /// Exclude a house when any reservation `[check_in, check_out)` overlaps the stay
    #[default]
    Overlap,
    /// Exclude a house when a reservation checks in after the stay's
    /// check-in and on or before its check-out. Reservation check-outs are
    /// ignored. Only the date part of the old predicate is kept: its
    /// `max_guest` term is replaced by the positive `headcount` filter.
    Legacy,
}

impl FromStr for AvailabilityRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overlap" => Ok(AvailabilityRule::Overlap),
            "legacy" => Ok(AvailabilityRule::Legacy),
            other => anyhow::bail!("unknown availability rule `{other}`, expected `overlap` or `legacy`"),
        }
    }
}

impl fmt::Display for AvailabilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityRule::Overlap => f.write_str("overlap"),
            AvailabilityRule::Legacy => f.write_str("legacy"),
        }
    }
}

/// Requested stay. Houses with a conflicting reservation are filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rule: AvailabilityRule,
}

impl StayWindow {
    pub fn conflicts_with(&self, reserved_in: NaiveDate, reserved_out: NaiveDate) -> bool {
        match self.rule {
            AvailabilityRule::Overlap => reserved_in < self.check_out && reserved_out > self.check_in,
            AvailabilityRule::Legacy => reserved_in > self.check_in && reserved_in <= self.check_out,
        }
    }
}

/// Filters for a listing search. Empty sets and `None` mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingCriteria {
    pub house_types: Vec<String>,
    pub ghosts: Vec<String>,
    pub countries: Vec<String>,
    pub cities: Vec<String>,
    pub trap: Option<String>,
    pub exit: Option<String>,
    /// Matches houses whose `max_guest` is strictly below this value
    pub headcount: Option<i64>,
    pub stay: Option<StayWindow>,
}

impl ListingCriteria {
    pub fn is_unfiltered(&self) -> bool {
        *self == ListingCriteria::default()
    }
}

/// Window into the filtered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Raw `/houses` query string. List filters may repeat (`?city=A&city=B`).
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub house_type: Vec<String>,
    #[serde(default)]
    pub ghost: Vec<String>,
    #[serde(default)]
    pub country: Vec<String>,
    #[serde(default)]
    pub city: Vec<String>,
    // Scalars keep the last non-empty value when repeated.
    #[serde(default)]
    pub trap: Vec<String>,
    #[serde(default)]
    pub exit: Vec<String>,
    #[serde(default)]
    pub check_in: Vec<String>,
    #[serde(default)]
    pub check_out: Vec<String>,
    #[serde(default)]
    pub headcount: Vec<String>,
    #[serde(default)]
    pub limit: Vec<String>,
    #[serde(default)]
    pub offset: Vec<String>,
}

impl ListingQuery {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Ok(Self::default());
        };

        serde_html_form::from_str(raw).map_err(|e| AppError::validation("query", e.to_string()))
    }

    /// Validate the raw values. `limit` is clamped to `max_page_size`.
    pub fn into_search(
        self,
        rule: AvailabilityRule,
        max_page_size: i64,
    ) -> Result<(ListingCriteria, Pagination), AppError> {
        let headcount = parse_count("headcount", last_value(self.headcount))?;
        let limit = parse_count("limit", last_value(self.limit))?.unwrap_or(DEFAULT_LIMIT);
        let offset = parse_count("offset", last_value(self.offset))?.unwrap_or(DEFAULT_OFFSET);

        let check_in = parse_date("check_in", last_value(self.check_in))?;
        let check_out = parse_date("check_out", last_value(self.check_out))?;
        let stay = match (check_in, check_out) {
            (Some(check_in), Some(check_out)) => {
                if check_out < check_in {
                    return Err(AppError::validation(
                        "check_out",
                        format!("{check_out} is before check_in {check_in}"),
                    ));
                }
                Some(StayWindow {
                    check_in,
                    check_out,
                    rule,
                })
            }
            _ => None,
        };

        let criteria = ListingCriteria {
            house_types: non_empty_values(self.house_type),
            ghosts: non_empty_values(self.ghost),
            countries: non_empty_values(self.country),
            cities: non_empty_values(self.city),
            trap: last_value(self.trap),
            exit: last_value(self.exit),
            headcount,
            stay,
        };

        if limit > max_page_size {
            tracing::debug!(limit, max_page_size, "Clamping requested page size");
        }

        let pagination = Pagination {
            limit: limit.min(max_page_size),
            offset,
        };

        Ok((criteria, pagination))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_empty_values(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| non_empty(Some(v)))
        .collect()
}

fn last_value(values: Vec<String>) -> Option<String> {
    non_empty_values(values).pop()
}

fn parse_count(field: &'static str, value: Option<String>) -> Result<Option<i64>, AppError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };

    value
        .parse::<u64>()
        .map(|n| Some(i64::try_from(n).unwrap_or(i64::MAX)))
        .map_err(|_| AppError::validation(field, format!("expected a non-negative integer, got `{value}`")))
}

fn parse_date(field: &'static str, value: Option<String>) -> Result<Option<NaiveDate>, AppError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::validation(field, format!("expected a YYYY-MM-DD date, got `{value}`")))
}
