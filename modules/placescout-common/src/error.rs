use std::path::PathBuf;

use places_client::PlacesError;
use thiserror::Error;

/// Pipeline stage that talks to an external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Details,
    Distance,
    Translation,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Search => write!(f, "search"),
            Stage::Details => write!(f, "details"),
            Stage::Distance => write!(f, "distance"),
            Stage::Translation => write!(f, "translation"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("{stage} failed: provider returned HTTP {http_status}: {message}")]
    ProviderStatus {
        stage: Stage,
        http_status: u16,
        message: String,
    },

    /// HTTP 200 whose body reports a non-OK status.
    #[error("{stage} failed: provider rejected request with {status}: {message}")]
    ProviderRejected {
        stage: Stage,
        status: String,
        message: String,
    },

    #[error("{stage} failed: request did not complete: {message}")]
    Transport { stage: Stage, message: String },

    #[error("{stage} failed: response missing {missing_field}")]
    MalformedResponse { stage: Stage, missing_field: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Attach the stage to a client error.
    pub fn at(stage: Stage, err: PlacesError) -> Self {
        match err {
            PlacesError::Api { status, message } => ScoutError::ProviderStatus {
                stage,
                http_status: status,
                message,
            },
            PlacesError::Provider { status, message } => ScoutError::ProviderRejected {
                stage,
                status,
                message,
            },
            PlacesError::Network(message) | PlacesError::Timeout(message) => {
                ScoutError::Transport { stage, message }
            }
            PlacesError::Parse(message) => ScoutError::MalformedResponse {
                stage,
                missing_field: format!("valid JSON body ({message})"),
            },
            PlacesError::MissingField(field) => ScoutError::MalformedResponse {
                stage,
                missing_field: field,
            },
            PlacesError::ElementCount { expected, actual } => ScoutError::MalformedResponse {
                stage,
                missing_field: format!("rows[0].elements (expected {expected}, got {actual})"),
            },
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            ScoutError::ProviderStatus { stage, .. }
            | ScoutError::ProviderRejected { stage, .. }
            | ScoutError::Transport { stage, .. }
            | ScoutError::MalformedResponse { stage, .. } => Some(*stage),
            ScoutError::Configuration(_) | ScoutError::Output { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_keeps_stage_and_code() {
        let err = ScoutError::at(
            Stage::Details,
            PlacesError::Api {
                status: 403,
                message: "forbidden".to_string(),
            },
        );
        assert_eq!(err.stage(), Some(Stage::Details));
        assert!(matches!(
            err,
            ScoutError::ProviderStatus {
                http_status: 403,
                ..
            }
        ));
        assert!(err.to_string().starts_with("details failed"));
    }

    #[test]
    fn timeout_is_a_transport_failure() {
        let err = ScoutError::at(Stage::Distance, PlacesError::Timeout("30s".to_string()));
        assert!(matches!(
            err,
            ScoutError::Transport {
                stage: Stage::Distance,
                ..
            }
        ));
    }

    #[test]
    fn missing_field_becomes_malformed_response() {
        let err = ScoutError::at(
            Stage::Details,
            PlacesError::MissingField("result.geometry.location".to_string()),
        );
        match err {
            ScoutError::MalformedResponse {
                stage,
                missing_field,
            } => {
                assert_eq!(stage, Stage::Details);
                assert_eq!(missing_field, "result.geometry.location");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
