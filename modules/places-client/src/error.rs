use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlacesError>;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP 200 whose body carries a non-OK provider status (e.g. REQUEST_DENIED).
    #[error("Provider status {status}: {message}")]
    Provider { status: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response missing required field: {0}")]
    MissingField(String),

    #[error("Expected {expected} distance elements, got {actual}")]
    ElementCount { expected: usize, actual: usize },
}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlacesError::Timeout(err.to_string())
        } else {
            PlacesError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PlacesError {
    fn from(err: serde_json::Error) -> Self {
        PlacesError::Parse(err.to_string())
    }
}
