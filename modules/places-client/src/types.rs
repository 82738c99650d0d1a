use serde::{Deserialize, Serialize};

use crate::error::{PlacesError, Result};

/// Google caps place details at five reviews; we never keep more.
pub const MAX_REVIEWS: usize = 5;

// --- Shared value types ---

/// A WGS84 coordinate as the Maps APIs spell it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` as used by `location`, `origins` and `destinations`.
    pub fn to_param(self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Ordering requested from nearby search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankBy {
    /// Provider relevance within `radius`.
    #[default]
    Prominence,
    /// Nearest first. The provider rejects `radius` in this mode.
    Distance,
}

impl std::str::FromStr for RankBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prominence" => Ok(RankBy::Prominence),
            "distance" => Ok(RankBy::Distance),
            other => Err(format!("unknown rank mode '{other}' (expected prominence|distance)")),
        }
    }
}

// --- Nearby search ---

/// Parameters for `place/nearbysearch`.
#[derive(Debug, Clone)]
pub struct NearbySearchQuery {
    pub keyword: String,
    pub location: LatLng,
    pub radius_m: u32,
    pub open_now: bool,
    pub rank_by: RankBy,
}

impl NearbySearchQuery {
    /// Query-string pairs, credential excluded.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("keyword", self.keyword.clone()),
            ("location", self.location.to_param()),
        ];
        match self.rank_by {
            RankBy::Prominence => params.push(("radius", self.radius_m.to_string())),
            RankBy::Distance => params.push(("rankby", "distance".to_string())),
        }
        if self.open_now {
            params.push(("opennow", "true".to_string()));
        }
        params
    }
}

/// One nearby-search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    pub name: String,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    status: Option<String>,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<RawNearbyPlace>,
}

#[derive(Debug, Deserialize)]
struct RawNearbyPlace {
    name: Option<String>,
    rating: Option<f64>,
    price_level: Option<u8>,
    place_id: Option<String>,
}

impl NearbySearchResponse {
    pub(crate) fn into_places(self) -> Result<Vec<NearbyPlace>> {
        check_status(self.status.as_deref(), self.error_message)?;
        self.results
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                let name = raw
                    .name
                    .ok_or_else(|| PlacesError::MissingField(format!("results[{i}].name")))?;
                Ok(NearbyPlace {
                    name,
                    rating: raw.rating,
                    price_level: raw.price_level,
                    place_id: raw.place_id,
                })
            })
            .collect()
    }
}

// --- Place details ---

/// The subset of `place/details` the scout consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub reviews: Vec<String>,
    pub editorial_overview: Option<String>,
    pub location: LatLng,
    pub weekday_text: Option<Vec<String>>,
    pub dine_in: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceDetailsResponse {
    status: Option<String>,
    error_message: Option<String>,
    result: Option<RawDetails>,
}

#[derive(Debug, Deserialize)]
struct RawDetails {
    #[serde(default)]
    reviews: Vec<RawReview>,
    editorial_summary: Option<EditorialSummary>,
    geometry: Option<Geometry>,
    opening_hours: Option<OpeningHours>,
    dine_in: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct EditorialSummary {
    overview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    weekday_text: Option<Vec<String>>,
}

impl PlaceDetailsResponse {
    pub(crate) fn into_details(self) -> Result<PlaceDetails> {
        check_status(self.status.as_deref(), self.error_message)?;
        let result = self
            .result
            .ok_or_else(|| PlacesError::MissingField("result".to_string()))?;

        let location = result
            .geometry
            .and_then(|g| g.location)
            .ok_or_else(|| PlacesError::MissingField("result.geometry.location".to_string()))?;

        let reviews = result
            .reviews
            .into_iter()
            .take(MAX_REVIEWS)
            .map(|r| r.text)
            .collect();

        Ok(PlaceDetails {
            reviews,
            editorial_overview: result.editorial_summary.and_then(|e| e.overview),
            location,
            weekday_text: result.opening_hours.and_then(|h| h.weekday_text),
            dine_in: result.dine_in,
        })
    }
}

// --- Distance matrix ---

#[derive(Debug, Deserialize)]
pub(crate) struct DistanceMatrixResponse {
    status: Option<String>,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<DistanceRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceRow {
    #[serde(default)]
    elements: Vec<DistanceElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceElement {
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: Option<String>,
}

impl DistanceMatrixResponse {
    /// Distance texts for the single origin row, index-aligned with the
    /// destinations that were sent.
    pub(crate) fn into_distances(self, expected: usize) -> Result<Vec<String>> {
        check_status(self.status.as_deref(), self.error_message)?;
        let row = self
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| PlacesError::MissingField("rows[0]".to_string()))?;

        if row.elements.len() != expected {
            return Err(PlacesError::ElementCount {
                expected,
                actual: row.elements.len(),
            });
        }

        row.elements
            .into_iter()
            .enumerate()
            .map(|(i, element)| {
                element.distance.and_then(|d| d.text).ok_or_else(|| {
                    PlacesError::MissingField(format!("rows[0].elements[{i}].distance.text"))
                })
            })
            .collect()
    }
}

// --- Translation ---

#[derive(Debug, Serialize)]
pub(crate) struct TranslateRequest<'a> {
    pub q: &'a str,
    pub target: &'a str,
    pub format: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranslateResponse {
    data: Option<TranslateData>,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl TranslateResponse {
    pub(crate) fn into_text(self) -> Result<String> {
        self.data
            .and_then(|d| d.translations.into_iter().next())
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                PlacesError::MissingField("data.translations[0].translatedText".to_string())
            })
    }
}

/// Maps APIs report failures inside a 200 body. `ZERO_RESULTS` is a success.
fn check_status(status: Option<&str>, error_message: Option<String>) -> Result<()> {
    match status {
        None | Some("OK") | Some("ZERO_RESULTS") => Ok(()),
        Some(other) => Err(PlacesError::Provider {
            status: other.to_string(),
            message: error_message.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nearby(body: &str) -> Result<Vec<NearbyPlace>> {
        serde_json::from_str::<NearbySearchResponse>(body)?.into_places()
    }

    fn details(body: &str) -> Result<PlaceDetails> {
        serde_json::from_str::<PlaceDetailsResponse>(body)?.into_details()
    }

    fn distances(body: &str, expected: usize) -> Result<Vec<String>> {
        serde_json::from_str::<DistanceMatrixResponse>(body)?.into_distances(expected)
    }

    #[test]
    fn nearby_search_keeps_optional_fields_optional() {
        let places = nearby(
            r#"{"status":"OK","results":[
                {"name":"Cafe Luna","rating":4.5,"price_level":2,"place_id":"abc"},
                {"name":"Noodle Bar"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].price_level, Some(2));
        assert_eq!(places[0].place_id.as_deref(), Some("abc"));
        assert_eq!(places[1].rating, None);
        assert_eq!(places[1].place_id, None);
    }

    #[test]
    fn nearby_search_zero_results_is_empty() {
        let places = nearby(r#"{"status":"ZERO_RESULTS","results":[]}"#).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn nearby_result_without_name_is_malformed() {
        let err = nearby(r#"{"status":"OK","results":[{"place_id":"abc"}]}"#).unwrap_err();
        assert!(matches!(err, PlacesError::MissingField(f) if f == "results[0].name"));
    }

    #[test]
    fn request_denied_body_is_provider_error() {
        let err = nearby(
            r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid.","results":[]}"#,
        )
        .unwrap_err();
        match err {
            PlacesError::Provider { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert!(message.contains("invalid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn details_without_reviews_yields_empty_list() {
        let d = details(
            r#"{"status":"OK","result":{"geometry":{"location":{"lat":52.52,"lng":13.405}}}}"#,
        )
        .unwrap();
        assert!(d.reviews.is_empty());
        assert_eq!(d.editorial_overview, None);
        assert_eq!(d.location, LatLng::new(52.52, 13.405));
    }

    #[test]
    fn details_caps_reviews_at_five() {
        let reviews: Vec<String> = (0..7).map(|i| format!(r#"{{"text":"review {i}"}}"#)).collect();
        let body = format!(
            r#"{{"status":"OK","result":{{"reviews":[{}],"geometry":{{"location":{{"lat":1.0,"lng":2.0}}}}}}}}"#,
            reviews.join(",")
        );
        let d = details(&body).unwrap();
        assert_eq!(d.reviews.len(), MAX_REVIEWS);
        assert_eq!(d.reviews[4], "review 4");
    }

    #[test]
    fn details_extracts_hours_dine_in_and_overview() {
        let d = details(
            r#"{"status":"OK","result":{
                "editorial_summary":{"overview":"Cozy spot."},
                "geometry":{"location":{"lat":1.0,"lng":2.0}},
                "opening_hours":{"weekday_text":["Monday: 9 AM – 5 PM"]},
                "dine_in":true
            }}"#,
        )
        .unwrap();
        assert_eq!(d.editorial_overview.as_deref(), Some("Cozy spot."));
        assert_eq!(d.weekday_text.unwrap().len(), 1);
        assert_eq!(d.dine_in, Some(true));
    }

    #[test]
    fn details_without_location_is_malformed() {
        let err = details(r#"{"status":"OK","result":{"geometry":{}}}"#).unwrap_err();
        assert!(
            matches!(err, PlacesError::MissingField(ref f) if f == "result.geometry.location"),
            "got {err:?}"
        );
    }

    #[test]
    fn distances_stay_index_aligned() {
        let d = distances(
            r#"{"status":"OK","rows":[{"elements":[
                {"status":"OK","distance":{"text":"0.4 km","value":400}},
                {"status":"OK","distance":{"text":"1.2 km","value":1200}},
                {"status":"OK","distance":{"text":"90 m","value":90}}
            ]}]}"#,
            3,
        )
        .unwrap();
        assert_eq!(d, vec!["0.4 km", "1.2 km", "90 m"]);
    }

    #[test]
    fn distance_element_count_mismatch_is_rejected() {
        let err = distances(
            r#"{"status":"OK","rows":[{"elements":[{"distance":{"text":"1 km"}}]}]}"#,
            2,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlacesError::ElementCount {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn unreachable_destination_is_missing_distance() {
        let err = distances(
            r#"{"status":"OK","rows":[{"elements":[{"status":"ZERO_RESULTS"}]}]}"#,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, PlacesError::MissingField(f) if f.ends_with("distance.text")));
    }

    #[test]
    fn nearby_query_params_follow_rank_mode() {
        let mut query = NearbySearchQuery {
            keyword: "museum, history".to_string(),
            location: LatLng::new(48.137, 11.575),
            radius_m: 2000,
            open_now: true,
            rank_by: RankBy::Prominence,
        };
        let params = query.params();
        assert!(params.contains(&("radius", "2000".to_string())));
        assert!(params.contains(&("opennow", "true".to_string())));
        assert!(params.contains(&("location", "48.137,11.575".to_string())));

        query.rank_by = RankBy::Distance;
        query.open_now = false;
        let params = query.params();
        assert!(params.iter().all(|(k, _)| *k != "radius" && *k != "opennow"));
        assert!(params.contains(&("rankby", "distance".to_string())));
    }

    #[test]
    fn translation_text_is_extracted() {
        let resp: TranslateResponse = serde_json::from_str(
            r#"{"data":{"translations":[{"translatedText":"Great coffee.","detectedSourceLanguage":"de"}]}}"#,
        )
        .unwrap();
        assert_eq!(resp.into_text().unwrap(), "Great coffee.");
    }
}
