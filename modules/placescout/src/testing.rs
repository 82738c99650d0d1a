// Test mocks for the scout pipeline.
//
// - MockProvider (PlacesProvider): canned search results, per-id details,
//   per-id failures; records every call so tests can assert ordering.
// - MockTranslator (ReviewTranslator): tags text with the target language.
//
// Plus builders for the provider payloads.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use places_client::{LatLng, NearbyPlace, NearbySearchQuery, PlaceDetails, PlacesError};

use crate::traits::{PlacesProvider, ReviewTranslator};

type ProviderResult<T> = std::result::Result<T, PlacesError>;

/// Berlin Alexanderplatz.
pub const ORIGIN: LatLng = LatLng {
    lat: 52.5219,
    lng: 13.4132,
};

// ---------------------------------------------------------------------------
// MockProvider
// ---------------------------------------------------------------------------

/// In-memory places provider. Unregistered place ids fail with HTTP 404.
/// Distances default to `"to {lat},{lng}"` so positional alignment is checkable.
#[derive(Default)]
pub struct MockProvider {
    results: Vec<NearbyPlace>,
    search_status: Option<u16>,
    details: HashMap<String, PlaceDetails>,
    detail_status: HashMap<String, u16>,
    distances: Option<Vec<String>>,
    distance_status: Option<u16>,

    pub searches: Mutex<Vec<NearbySearchQuery>>,
    pub detail_calls: Mutex<Vec<String>>,
    pub distance_calls: Mutex<Vec<Vec<LatLng>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, results: Vec<NearbyPlace>) -> Self {
        self.results = results;
        self
    }

    pub fn search_fails(mut self, status: u16) -> Self {
        self.search_status = Some(status);
        self
    }

    pub fn on_details(mut self, place_id: &str, details: PlaceDetails) -> Self {
        self.details.insert(place_id.to_string(), details);
        self
    }

    pub fn details_fail(mut self, place_id: &str, status: u16) -> Self {
        self.detail_status.insert(place_id.to_string(), status);
        self
    }

    pub fn on_distances(mut self, distances: Vec<String>) -> Self {
        self.distances = Some(distances);
        self
    }

    pub fn distance_fails(mut self, status: u16) -> Self {
        self.distance_status = Some(status);
        self
    }
}

fn api_error(status: u16) -> PlacesError {
    PlacesError::Api {
        status,
        message: format!("mock status {status}"),
    }
}

#[async_trait]
impl PlacesProvider for MockProvider {
    async fn nearby_search(&self, query: &NearbySearchQuery) -> ProviderResult<Vec<NearbyPlace>> {
        self.searches.lock().unwrap().push(query.clone());
        match self.search_status {
            Some(status) => Err(api_error(status)),
            None => Ok(self.results.clone()),
        }
    }

    async fn place_details(&self, place_id: &str, _language: &str) -> ProviderResult<PlaceDetails> {
        self.detail_calls.lock().unwrap().push(place_id.to_string());
        if let Some(&status) = self.detail_status.get(place_id) {
            return Err(api_error(status));
        }
        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| api_error(404))
    }

    async fn walking_distances(
        &self,
        _origin: LatLng,
        destinations: &[LatLng],
    ) -> ProviderResult<Vec<String>> {
        self.distance_calls.lock().unwrap().push(destinations.to_vec());
        if let Some(status) = self.distance_status {
            return Err(api_error(status));
        }
        Ok(match &self.distances {
            Some(distances) => distances.clone(),
            None => destinations
                .iter()
                .map(|d| format!("to {},{}", d.lat, d.lng))
                .collect(),
        })
    }

    fn details_url(&self, place_id: &str, language: &str) -> String {
        format!("https://maps.test/details?place_id={place_id}&language={language}")
    }
}

// ---------------------------------------------------------------------------
// MockTranslator
// ---------------------------------------------------------------------------

/// Prefixes text with `[target] `. Fails on text containing `fail_on`.
#[derive(Default)]
pub struct MockTranslator {
    fail_on: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }
}

#[async_trait]
impl ReviewTranslator for MockTranslator {
    async fn translate(&self, text: &str, target: &str) -> ProviderResult<String> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.fail_on.as_deref().is_some_and(|n| text.contains(n)) {
            return Err(PlacesError::Timeout("mock translator timed out".to_string()));
        }
        Ok(format!("[{target}] {text}"))
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

pub fn nearby(name: &str, place_id: &str) -> NearbyPlace {
    NearbyPlace {
        name: name.to_string(),
        rating: Some(4.0),
        price_level: Some(2),
        place_id: Some(place_id.to_string()),
    }
}

pub fn week() -> Vec<String> {
    [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ]
    .iter()
    .map(|day| format!("{day}: 9:00 AM – 10:00 PM"))
    .collect()
}

/// Details with weekly hours and dine-in both present.
pub fn details(lat: f64, lng: f64, reviews: &[&str]) -> PlaceDetails {
    PlaceDetails {
        reviews: reviews.iter().map(|r| r.to_string()).collect(),
        editorial_overview: None,
        location: LatLng::new(lat, lng),
        weekday_text: Some(week()),
        dine_in: Some(true),
    }
}
