use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use places_client::RankBy;

use crate::error::{Result, ScoutError};

pub const DEFAULT_RADIUS_M: u32 = 2000;
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OUTPUT_PATH: &str = "scraped_data.json";

/// Which operational-status field the details stage must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoursMode {
    /// `opening_hours.weekday_text`, emitted as "Opening hours".
    #[default]
    WeeklyHours,
    /// `dine_in`, emitted as "Indoor eating place".
    DineIn,
}

impl FromStr for HoursMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly-hours" | "weekly_hours" | "hours" => Ok(HoursMode::WeeklyHours),
            "dine-in" | "dine_in" => Ok(HoursMode::DineIn),
            other => Err(format!(
                "unknown hours mode '{other}' (expected weekly-hours|dine-in)"
            )),
        }
    }
}

impl std::fmt::Display for HoursMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoursMode::WeeklyHours => write!(f, "weekly-hours"),
            HoursMode::DineIn => write!(f, "dine-in"),
        }
    }
}

/// Stop-word filtering applied to review text before summarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWordMode {
    Off,
    Remove,
    /// Remove stop-words but keep negations ("not", "no", "never", ...).
    #[default]
    PreserveNegations,
}

impl FromStr for StopWordMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(StopWordMode::Off),
            "remove" => Ok(StopWordMode::Remove),
            "preserve-negations" | "preserve_negations" => Ok(StopWordMode::PreserveNegations),
            other => Err(format!(
                "unknown stop-word mode '{other}' (expected off|remove|preserve-negations)"
            )),
        }
    }
}

impl std::fmt::Display for StopWordMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopWordMode::Off => write!(f, "off"),
            StopWordMode::Remove => write!(f, "remove"),
            StopWordMode::PreserveNegations => write!(f, "preserve-negations"),
        }
    }
}

/// Scout configuration. The credential is the only required value; every
/// other knob has a default matching a plain nearby-search run.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    // Provider
    pub google_maps_api_key: String,
    pub request_timeout: Duration,

    // Search
    pub search_radius_m: u32,
    pub open_now: bool,
    pub rank_by: RankBy,

    // Details
    pub details_language: String,
    pub hours_mode: HoursMode,
    pub translate_reviews: bool,
    pub translate_target: String,

    // Summaries
    pub summarize_reviews: bool,
    pub summary_sentences: usize,
    pub stop_words: StopWordMode,

    // Output
    pub include_description: bool,
    pub include_raw_reviews: bool,
    pub output_path: PathBuf,
}

impl ScoutConfig {
    pub fn new(google_maps_api_key: impl Into<String>) -> Self {
        Self {
            google_maps_api_key: google_maps_api_key.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            search_radius_m: DEFAULT_RADIUS_M,
            open_now: true,
            rank_by: RankBy::Prominence,
            details_language: "en".to_string(),
            hours_mode: HoursMode::WeeklyHours,
            translate_reviews: false,
            translate_target: "en".to_string(),
            summarize_reviews: true,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            stop_words: StopWordMode::PreserveNegations,
            include_description: false,
            include_raw_reviews: false,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }

    /// Load configuration from environment variables (after `.env`).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("GOOGLE_MAPS_API_KEY").map_err(|_| {
            ScoutError::Configuration("GOOGLE_MAPS_API_KEY environment variable is required".into())
        })?;

        let mut config = Self::new(api_key);
        config.request_timeout =
            Duration::from_secs(env_or("REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);
        config.search_radius_m = env_or("PLACES_RADIUS_M", DEFAULT_RADIUS_M)?;
        config.open_now = env_or("PLACES_OPEN_NOW", true)?;
        config.rank_by = env_or("PLACES_RANK_BY", RankBy::Prominence)?;
        config.details_language = env_or("PLACES_LANGUAGE", config.details_language)?;
        config.hours_mode = env_or("HOURS_MODE", HoursMode::WeeklyHours)?;
        config.translate_reviews = env_or("TRANSLATE_REVIEWS", false)?;
        config.translate_target = env_or("TRANSLATE_TARGET", config.translate_target)?;
        config.summarize_reviews = env_or("SUMMARIZE_REVIEWS", true)?;
        config.summary_sentences = env_or("SUMMARY_SENTENCES", DEFAULT_SUMMARY_SENTENCES)?;
        config.stop_words = env_or("STOP_WORDS", StopWordMode::PreserveNegations)?;
        config.include_description = env_or("INCLUDE_DESCRIPTION", false)?;
        config.include_raw_reviews = env_or("INCLUDE_RAW_REVIEWS", false)?;
        config.output_path = env_or("OUTPUT_PATH", config.output_path)?;

        config.validate()?;
        config.log_redacted();
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.google_maps_api_key.trim().is_empty() {
            return Err(ScoutError::Configuration(
                "GOOGLE_MAPS_API_KEY must not be blank".into(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ScoutError::Configuration(
                "request timeout must be greater than zero".into(),
            ));
        }
        if self.rank_by == RankBy::Prominence && self.search_radius_m == 0 {
            return Err(ScoutError::Configuration(
                "search radius must be greater than zero".into(),
            ));
        }
        if self.summarize_reviews && self.summary_sentences == 0 {
            return Err(ScoutError::Configuration(
                "summary sentence count must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn log_redacted(&self) {
        fn preview(val: &str) -> String {
            let n = val.len().min(5);
            format!("{}...({} chars)", &val[..n], val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  GOOGLE_MAPS_API_KEY: {}", preview(&self.google_maps_api_key));
        tracing::info!(
            radius_m = self.search_radius_m,
            open_now = self.open_now,
            rank_by = ?self.rank_by,
            language = %self.details_language,
            hours_mode = %self.hours_mode,
            translate = self.translate_reviews,
            summarize = self.summarize_reviews,
            stop_words = %self.stop_words,
            output = %self.output_path.display(),
            "  pipeline settings"
        );
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| ScoutError::Configuration(format!("{key}: {e}"))),
        _ => Ok(default),
    }
}
