use places_client::LatLng;
use serde::Serialize;

// --- Pipeline entity ---

/// Operational status as the details stage reports it. Which variant is
/// produced depends on the configured hours mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OperationalStatus {
    #[serde(rename = "Opening hours")]
    WeeklyHours(Vec<String>),
    #[serde(rename = "Indoor eating place")]
    DineIn(bool),
}

/// One point of interest flowing through the pipeline.
///
/// Created at search time with the listing fields, then filled in by the
/// details, distance and summary stages. Positions in the run's `Vec<Place>`
/// never change after search.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub place_id: Option<String>,
    /// Display name, unique within the run once disambiguated.
    pub name: String,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub location: Option<LatLng>,
    pub reviews: Vec<String>,
    pub description: Option<String>,
    pub status: Option<OperationalStatus>,
    pub distance: Option<String>,
    pub summary: Option<String>,
}

impl Place {
    pub fn new(
        name: String,
        rating: Option<f64>,
        price_level: Option<u8>,
        place_id: Option<String>,
    ) -> Self {
        Self {
            place_id,
            name,
            rating,
            price_level,
            location: None,
            reviews: Vec::new(),
            description: None,
            status: None,
            distance: None,
            summary: None,
        }
    }

    /// `https://www.google.com/maps?q=lat,lng` once the coordinate is known.
    pub fn map_link(&self) -> Option<String> {
        self.location
            .map(|loc| format!("https://www.google.com/maps?q={},{}", loc.lat, loc.lng))
    }
}

// --- Output record ---

/// The five raw review columns, kept when raw reviews are requested.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RawReviewColumns {
    #[serde(rename = "Review_1")]
    pub review_1: Option<String>,
    #[serde(rename = "Review_2")]
    pub review_2: Option<String>,
    #[serde(rename = "Review_3")]
    pub review_3: Option<String>,
    #[serde(rename = "Review_4")]
    pub review_4: Option<String>,
    #[serde(rename = "Review_5")]
    pub review_5: Option<String>,
}

impl RawReviewColumns {
    pub fn from_reviews(reviews: &[String]) -> Self {
        let col = |i: usize| reviews.get(i).cloned();
        Self {
            review_1: col(0),
            review_2: col(1),
            review_3: col(2),
            review_4: col(3),
            review_5: col(4),
        }
    }
}

/// One serialized place. Keys match the scraped_data.json column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Price Score")]
    pub price_score: Option<u8>,
    #[serde(rename = "Place_ids")]
    pub place_id: Option<String>,
    #[serde(rename = "Place urls")]
    pub place_url: String,
    #[serde(rename = "Google map link")]
    pub map_link: String,
    #[serde(rename = "Distance to a place")]
    pub distance: String,
    #[serde(flatten)]
    pub status: OperationalStatus,
    /// Outer `None` drops the key; `Some(None)` writes `null`.
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(flatten)]
    pub raw_reviews: Option<RawReviewColumns>,
    #[serde(rename = "Summary of reviews", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(status: OperationalStatus) -> PlaceRecord {
        PlaceRecord {
            name: "Cafe Luna".to_string(),
            rating: Some(4.6),
            price_score: None,
            place_id: Some("abc".to_string()),
            place_url: "https://maps.googleapis.com/maps/api/place/details/json?place_id=abc&language=en".to_string(),
            map_link: "https://www.google.com/maps?q=52.5,13.4".to_string(),
            distance: "0.8 km".to_string(),
            status,
            description: None,
            raw_reviews: None,
            summary: Some("Great coffee.".to_string()),
        }
    }

    #[test]
    fn weekly_hours_serialize_under_opening_hours() {
        let value =
            serde_json::to_value(record(OperationalStatus::WeeklyHours(vec!["Mon".into()])))
                .unwrap();
        assert_eq!(value["Opening hours"], json!(["Mon"]));
        assert!(value.get("Indoor eating place").is_none());
        assert_eq!(value["Price Score"], json!(null));
        assert!(value.get("Description").is_none());
        assert!(value.get("Review_1").is_none());
    }

    #[test]
    fn dine_in_serializes_under_indoor_eating_place() {
        let value = serde_json::to_value(record(OperationalStatus::DineIn(false))).unwrap();
        assert_eq!(value["Indoor eating place"], json!(false));
        assert!(value.get("Opening hours").is_none());
    }

    #[test]
    fn optional_columns_appear_only_when_requested() {
        let mut r = record(OperationalStatus::DineIn(true));
        r.description = Some(None);
        r.raw_reviews = Some(RawReviewColumns::from_reviews(&["one".into(), "two".into()]));
        r.summary = None;

        let value = serde_json::to_value(r).unwrap();
        assert_eq!(value["Description"], json!(null));
        assert_eq!(value["Review_2"], json!("two"));
        assert_eq!(value["Review_5"], json!(null));
        assert!(value.get("Summary of reviews").is_none());
    }

    #[test]
    fn map_link_needs_a_location() {
        let mut place = Place::new("X".into(), None, None, None);
        assert_eq!(place.map_link(), None);
        place.location = Some(LatLng::new(48.1, 11.5));
        assert_eq!(
            place.map_link().as_deref(),
            Some("https://www.google.com/maps?q=48.1,11.5")
        );
    }
}
