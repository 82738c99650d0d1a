pub mod disambiguate;
pub mod scout;
pub mod stopwords;
pub mod summarizer;
pub mod traits;
pub mod writer;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

use std::sync::Arc;

use places_client::{GoogleMapsClient, TranslateClient};
use placescout_common::{PlaceRecord, Result, ScoutConfig, ScoutError};

pub use scout::{Scout, SearchRequest};

use crate::stopwords::StopWords;
use crate::summarizer::LsaSummarizer;

/// Build the production collaborators from `config` and run one search,
/// writing the records to `config.output_path`.
pub async fn run(request: &SearchRequest, config: ScoutConfig) -> Result<Vec<PlaceRecord>> {
    config.validate()?;

    let key = config.google_maps_api_key.as_str();
    let provider = GoogleMapsClient::new(key, config.request_timeout)
        .map_err(|e| ScoutError::Configuration(format!("HTTP client: {e}")))?;

    let review_language = if config.translate_reviews {
        &config.translate_target
    } else {
        &config.details_language
    };
    let summarizer = LsaSummarizer::new(StopWords::for_language(review_language));

    let translator = if config.translate_reviews {
        let client = TranslateClient::new(key, config.request_timeout)
            .map_err(|e| ScoutError::Configuration(format!("HTTP client: {e}")))?;
        Some(Arc::new(client))
    } else {
        None
    };

    let mut scout = Scout::new(Arc::new(provider), Arc::new(summarizer), config.clone());
    if let Some(translator) = translator {
        scout = scout.with_translator(translator);
    }
    scout.run(request).await
}
