pub mod config;
pub mod error;
pub mod types;

pub use config::{HoursMode, ScoutConfig, StopWordMode};
pub use error::{Result, ScoutError, Stage};
pub use places_client::{LatLng, RankBy};
pub use types::*;
