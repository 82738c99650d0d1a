// Trait seams for the scout's external collaborators.
//
// PlacesProvider: nearby search, place details, walking distances.
// ReviewTranslator: optional per-review translation.
// ReviewSummarizer: extractive summary of a review block.
//
// Production impls wrap places_client; tests swap in the mocks from
// `crate::testing` so the pipeline runs with no network.

use async_trait::async_trait;
use places_client::{
    GoogleMapsClient, LatLng, NearbyPlace, NearbySearchQuery, PlaceDetails, PlacesError,
    TranslateClient,
};

type ProviderResult<T> = std::result::Result<T, PlacesError>;

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby_search(&self, query: &NearbySearchQuery) -> ProviderResult<Vec<NearbyPlace>>;

    async fn place_details(&self, place_id: &str, language: &str) -> ProviderResult<PlaceDetails>;

    /// Distance texts index-aligned with `destinations`.
    async fn walking_distances(
        &self,
        origin: LatLng,
        destinations: &[LatLng],
    ) -> ProviderResult<Vec<String>>;

    /// Link stored in the record for a place. Must not leak the credential.
    fn details_url(&self, place_id: &str, language: &str) -> String;
}

#[async_trait]
impl PlacesProvider for GoogleMapsClient {
    async fn nearby_search(&self, query: &NearbySearchQuery) -> ProviderResult<Vec<NearbyPlace>> {
        self.nearby_search(query).await
    }

    async fn place_details(&self, place_id: &str, language: &str) -> ProviderResult<PlaceDetails> {
        self.place_details(place_id, language).await
    }

    async fn walking_distances(
        &self,
        origin: LatLng,
        destinations: &[LatLng],
    ) -> ProviderResult<Vec<String>> {
        self.walking_distances(origin, destinations).await
    }

    fn details_url(&self, place_id: &str, language: &str) -> String {
        self.details_url(place_id, language)
    }
}

#[async_trait]
pub trait ReviewTranslator: Send + Sync {
    async fn translate(&self, text: &str, target: &str) -> ProviderResult<String>;
}

#[async_trait]
impl ReviewTranslator for TranslateClient {
    async fn translate(&self, text: &str, target: &str) -> ProviderResult<String> {
        self.translate(text, target).await
    }
}

pub trait ReviewSummarizer: Send + Sync {
    /// Up to `sentence_count` original sentences, newline-joined, in document
    /// order. Empty input gives an empty string.
    fn summarize(&self, text: &str, sentence_count: usize) -> String;
}
