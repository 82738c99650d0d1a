//! The scout pipeline: search → disambiguate → details → distance →
//! summarize & write. Stages run strictly in sequence; the first error aborts
//! the run and nothing is written.

use std::sync::Arc;

use tracing::{info, warn};
use typed_builder::TypedBuilder;

use places_client::{LatLng, NearbySearchQuery};
use placescout_common::{
    HoursMode, OperationalStatus, Place, PlaceRecord, RawReviewColumns, Result, ScoutConfig,
    ScoutError, Stage,
};

use crate::disambiguate::disambiguate_names;
use crate::stopwords::StopWords;
use crate::traits::{PlacesProvider, ReviewSummarizer, ReviewTranslator};
use crate::writer::write_records;

/// What to look for and where.
#[derive(Debug, Clone, TypedBuilder)]
pub struct SearchRequest {
    pub origin: LatLng,
    /// Free-form keywords, e.g. `"restaurant, asian, cheap"`.
    #[builder(setter(into))]
    pub topics: String,
    /// Keep at most this many results; `None` keeps the provider's whole page.
    #[builder(default, setter(strip_option))]
    pub limit: Option<usize>,
}

pub struct Scout {
    provider: Arc<dyn PlacesProvider>,
    translator: Option<Arc<dyn ReviewTranslator>>,
    summarizer: Arc<dyn ReviewSummarizer>,
    config: ScoutConfig,
}

impl Scout {
    pub fn new(
        provider: Arc<dyn PlacesProvider>,
        summarizer: Arc<dyn ReviewSummarizer>,
        config: ScoutConfig,
    ) -> Self {
        Self {
            provider,
            translator: None,
            summarizer,
            config,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn ReviewTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Run every stage and write the records to the configured output path.
    pub async fn run(&self, request: &SearchRequest) -> Result<Vec<PlaceRecord>> {
        let records = self.collect(request).await?;
        write_records(&self.config.output_path, &records)?;
        Ok(records)
    }

    /// Run every stage without writing.
    pub async fn collect(&self, request: &SearchRequest) -> Result<Vec<PlaceRecord>> {
        self.config.validate()?;
        if self.config.translate_reviews && self.translator.is_none() {
            return Err(ScoutError::Configuration(
                "review translation is enabled but no translator is configured".into(),
            ));
        }

        info!(topics = %request.topics, limit = ?request.limit, "Searching");
        let mut places = self.search(request).await?;
        info!(count = places.len(), "Search complete");

        self.enrich_details(&mut places).await?;
        info!(count = places.len(), "Details complete");

        self.enrich_distances(request.origin, &mut places).await?;
        info!("Distances complete");

        self.summarize_reviews(&mut places);
        self.assemble(&places)
    }

    /// Nearby search plus name disambiguation.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>> {
        let query = NearbySearchQuery {
            keyword: request.topics.clone(),
            location: request.origin,
            radius_m: self.config.search_radius_m,
            open_now: self.config.open_now,
            rank_by: self.config.rank_by,
        };

        let mut results = self
            .provider
            .nearby_search(&query)
            .await
            .map_err(|e| ScoutError::at(Stage::Search, e))?;

        if let Some(limit) = request.limit {
            results.truncate(limit);
        }

        let names = disambiguate_names(&results.iter().map(|r| r.name.as_str()).collect::<Vec<_>>());

        Ok(results
            .into_iter()
            .zip(names)
            .map(|(r, name)| Place::new(name, r.rating, r.price_level, r.place_id))
            .collect())
    }

    /// One details lookup per place, in search order.
    async fn enrich_details(&self, places: &mut [Place]) -> Result<()> {
        let language = self.config.details_language.as_str();

        for (i, place) in places.iter_mut().enumerate() {
            let place_id = place.place_id.as_deref().ok_or_else(|| {
                ScoutError::MalformedResponse {
                    stage: Stage::Search,
                    missing_field: format!("results[{i}].place_id"),
                }
            })?;

            let details = self
                .provider
                .place_details(place_id, language)
                .await
                .map_err(|e| ScoutError::at(Stage::Details, e))?;

            let status = match self.config.hours_mode {
                HoursMode::WeeklyHours => details.weekday_text.map(OperationalStatus::WeeklyHours),
                HoursMode::DineIn => details.dine_in.map(OperationalStatus::DineIn),
            };
            let status = status.ok_or_else(|| ScoutError::MalformedResponse {
                stage: Stage::Details,
                missing_field: match self.config.hours_mode {
                    HoursMode::WeeklyHours => "result.opening_hours.weekday_text".to_string(),
                    HoursMode::DineIn => "result.dine_in".to_string(),
                },
            })?;

            let reviews = match (&self.translator, self.config.translate_reviews) {
                (Some(translator), true) => {
                    let mut translated = Vec::with_capacity(details.reviews.len());
                    for review in &details.reviews {
                        let text = translator
                            .translate(review, &self.config.translate_target)
                            .await
                            .map_err(|e| ScoutError::at(Stage::Translation, e))?;
                        translated.push(text);
                    }
                    translated
                }
                _ => details.reviews,
            };

            if place.location.is_some() {
                warn!(name = %place.name, "Coordinate already set, keeping the first one");
            } else {
                place.location = Some(details.location);
            }
            place.reviews = reviews;
            place.description = details.editorial_overview;
            place.status = Some(status);

            info!(
                name = %place.name,
                reviews = place.reviews.len(),
                "Fetched place details"
            );
        }
        Ok(())
    }

    /// One batched distance-matrix call; results are matched by position.
    async fn enrich_distances(&self, origin: LatLng, places: &mut [Place]) -> Result<()> {
        if places.is_empty() {
            return Ok(());
        }

        let destinations = places
            .iter()
            .map(|p| {
                p.location.ok_or_else(|| ScoutError::MalformedResponse {
                    stage: Stage::Details,
                    missing_field: "result.geometry.location".to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let distances = self
            .provider
            .walking_distances(origin, &destinations)
            .await
            .map_err(|e| ScoutError::at(Stage::Distance, e))?;

        if distances.len() != places.len() {
            return Err(ScoutError::MalformedResponse {
                stage: Stage::Distance,
                missing_field: format!(
                    "rows[0].elements (expected {}, got {})",
                    places.len(),
                    distances.len()
                ),
            });
        }

        for (place, distance) in places.iter_mut().zip(distances) {
            place.distance = Some(distance);
        }
        Ok(())
    }

    fn summarize_reviews(&self, places: &mut [Place]) {
        if !self.config.summarize_reviews {
            return;
        }

        let stop_words = StopWords::for_language(self.review_language());
        for place in places.iter_mut() {
            let joined = place.reviews.join(" ");
            let filtered = stop_words.filter(&joined, self.config.stop_words);
            place.summary = Some(
                self.summarizer
                    .summarize(&filtered, self.config.summary_sentences),
            );
        }
    }

    fn assemble(&self, places: &[Place]) -> Result<Vec<PlaceRecord>> {
        let language = self.config.details_language.as_str();

        places
            .iter()
            .map(|place| {
                let status = place.status.clone().ok_or_else(|| ScoutError::MalformedResponse {
                    stage: Stage::Details,
                    missing_field: "operational status".to_string(),
                })?;

                Ok(PlaceRecord {
                    name: place.name.clone(),
                    rating: place.rating,
                    price_score: place.price_level,
                    place_id: place.place_id.clone(),
                    place_url: place
                        .place_id
                        .as_deref()
                        .map(|id| self.provider.details_url(id, language))
                        .unwrap_or_default(),
                    map_link: place.map_link().unwrap_or_default(),
                    distance: place.distance.clone().unwrap_or_default(),
                    status,
                    description: self
                        .config
                        .include_description
                        .then(|| place.description.clone()),
                    raw_reviews: self
                        .config
                        .include_raw_reviews
                        .then(|| RawReviewColumns::from_reviews(&place.reviews)),
                    summary: place.summary.clone(),
                })
            })
            .collect()
    }

    /// Language the reviews are in by the time they are summarized.
    fn review_language(&self) -> &str {
        if self.config.translate_reviews {
            &self.config.translate_target
        } else {
            &self.config.details_language
        }
    }
}
