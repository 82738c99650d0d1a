pub mod error;
pub mod types;

pub use error::{PlacesError, Result};
pub use types::{LatLng, NearbyPlace, NearbySearchQuery, PlaceDetails, RankBy, MAX_REVIEWS};

use std::time::Duration;

use serde::de::DeserializeOwned;
use types::{
    DistanceMatrixResponse, NearbySearchResponse, PlaceDetailsResponse, TranslateRequest,
    TranslateResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
pub const DEFAULT_TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

pub struct GoogleMapsClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at another host (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Nearby search. Returns the provider's first page as-is.
    pub async fn nearby_search(&self, query: &NearbySearchQuery) -> Result<Vec<NearbyPlace>> {
        tracing::debug!(keyword = %query.keyword, location = %query.location.to_param(), "Nearby search");
        let resp: NearbySearchResponse = self
            .get_json("place/nearbysearch/json", &query.params())
            .await?;
        resp.into_places()
    }

    /// Fetch details for one place.
    pub async fn place_details(&self, place_id: &str, language: &str) -> Result<PlaceDetails> {
        tracing::debug!(place_id, language, "Place details");
        let params = [
            ("place_id", place_id.to_string()),
            ("language", language.to_string()),
        ];
        let resp: PlaceDetailsResponse = self.get_json("place/details/json", &params).await?;
        resp.into_details()
    }

    /// Walking distance from `origin` to every destination in one request.
    /// The returned texts are index-aligned with `destinations`.
    pub async fn walking_distances(
        &self,
        origin: LatLng,
        destinations: &[LatLng],
    ) -> Result<Vec<String>> {
        let joined = destinations
            .iter()
            .map(|d| d.to_param())
            .collect::<Vec<_>>()
            .join("|");
        tracing::debug!(destinations = destinations.len(), "Distance matrix");

        let params = [
            ("destinations", joined),
            ("origins", origin.to_param()),
            ("mode", "walking".to_string()),
        ];
        let resp: DistanceMatrixResponse = self.get_json("distancematrix/json", &params).await?;
        resp.into_distances(destinations.len())
    }

    /// Public detail link for a place. Never includes the API key.
    pub fn details_url(&self, place_id: &str, language: &str) -> String {
        format!(
            "{}/place/details/json?place_id={}&language={}",
            self.base_url, place_id, language
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Cloud Translation v2 client.
pub struct TranslateClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl TranslateClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            api_key: api_key.to_string(),
            endpoint: DEFAULT_TRANSLATE_URL.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Translate `text` into `target`, letting the provider detect the source language.
    pub async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let body = TranslateRequest {
            q: text,
            target,
            format: "text",
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        serde_json::from_str::<TranslateResponse>(&text)?.into_text()
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_url_omits_key() {
        let client = GoogleMapsClient::new("secret-key", Duration::from_secs(5))
            .unwrap()
            .with_base_url("https://maps.example.test/api/");
        let url = client.details_url("ChIJ123", "de");
        assert_eq!(
            url,
            "https://maps.example.test/api/place/details/json?place_id=ChIJ123&language=de"
        );
        assert!(!url.contains("secret-key"));
    }
}
