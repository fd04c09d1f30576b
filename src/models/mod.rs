use serde::{Deserialize, Serialize};

/// Kinds of house a listing can be. Mirrors the `house_types` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HouseType {
    Mansion,
    Castle,
    Cabin,
    Hospital,
    School,
    Church,
    Apartment,
}

impl HouseType {
    pub const ALL: [HouseType; 7] = [
        HouseType::Mansion,
        HouseType::Castle,
        HouseType::Cabin,
        HouseType::Hospital,
        HouseType::School,
        HouseType::Church,
        HouseType::Apartment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HouseType::Mansion => "Mansion",
            HouseType::Castle => "Castle",
            HouseType::Cabin => "Cabin",
            HouseType::Hospital => "Hospital",
            HouseType::School => "School",
            HouseType::Church => "Church",
            HouseType::Apartment => "Apartment",
        }
    }
}

/// Ghost categories a house can be haunted by. Mirrors the `ghosts` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Ghost {
    Poltergeist,
    Banshee,
    Phantom,
    Wraith,
    Demon,
    Zombie,
}

impl Ghost {
    pub const ALL: [Ghost; 6] = [
        Ghost::Poltergeist,
        Ghost::Banshee,
        Ghost::Phantom,
        Ghost::Wraith,
        Ghost::Demon,
        Ghost::Zombie,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Ghost::Poltergeist => "Poltergeist",
            Ghost::Banshee => "Banshee",
            Ghost::Phantom => "Phantom",
            Ghost::Wraith => "Wraith",
            Ghost::Demon => "Demon",
            Ghost::Zombie => "Zombie",
        }
    }
}

/// One row of the `/houses` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingSummary {
    pub house_id: i64,
    pub name: String,
    #[serde(rename = "house_image")]
    pub images: Vec<String>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub user_name: Option<String>,
    pub review_average: Option<f64>,
    pub review_count: i64,
    pub trap: String,
    pub exit: String,
    pub ghost: Option<String>,
    pub city: String,
    pub country: String,
    pub house_type: String,
}

/// Paginated search envelope.
///
/// `total_pages` is the name older clients read the match count from. It
/// always carries the same value as `total_count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingPage {
    pub results: Vec<ListingSummary>,
    pub total_count: i64,
    /// Deprecated alias of `total_count`.
    pub total_pages: i64,
}

impl ListingPage {
    pub fn new(results: Vec<ListingSummary>, total_count: i64) -> Self {
        Self {
            results,
            total_count,
            total_pages: total_count,
        }
    }
}

/// A single group of filter values in the `/options` response.
///
/// Serializes as `{"house_type": [...]}`, `{"ghost": [...]}` and so on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OptionGroup {
    HouseType(Vec<String>),
    Ghost(Vec<String>),
    Country(Vec<String>),
    City(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterOptions {
    pub results: Vec<OptionGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_groups_serialize_as_single_key_objects() {
        let options = FilterOptions {
            results: vec![
                OptionGroup::HouseType(vec!["Mansion".into()]),
                OptionGroup::City(vec![]),
            ],
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({ "results": [{ "house_type": ["Mansion"] }, { "city": [] }] })
        );
    }

    #[test]
    fn listing_page_mirrors_count_into_total_pages() {
        let value = serde_json::to_value(ListingPage::new(vec![], 7)).unwrap();
        assert_eq!(value["total_count"], 7);
        assert_eq!(value["total_pages"], 7);
    }

    #[test]
    fn summary_uses_wire_names() {
        let summary = ListingSummary {
            house_id: 1,
            name: "Hill House".into(),
            images: vec!["https://img/1.png".into()],
            latitude: 42.1,
            longitude: -73.2,
            user_name: None,
            review_average: None,
            review_count: 0,
            trap: "Pit".into(),
            exit: "Window".into(),
            ghost: None,
            city: "Hillsdale".into(),
            country: "USA".into(),
            house_type: "Mansion".into(),
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["house_image"], json!(["https://img/1.png"]));
        assert_eq!(value["lat"], json!(42.1));
        assert_eq!(value["lng"], json!(-73.2));
        assert!(value["review_average"].is_null());
        assert!(value["user_name"].is_null());
    }
}
