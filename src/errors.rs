use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures talking to the upstream places provider.
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("places provider unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("places provider did not answer in time")]
    Timeout,

    #[error("places provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("place {0} not found")]
    NotFound(String),

    #[error("malformed places provider response: {0}")]
    InvalidResponse(String),
}

impl PlacesError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return PlacesError::Timeout;
        }
        PlacesError::Network(e)
    }
}

/// A single photo reference could not be turned into a URL.
#[derive(Debug, Error)]
#[error("unable to resolve photo {photo_name}: {source}")]
pub struct MediaUnresolved {
    pub photo_name: String,
    #[source]
    pub source: PlacesError,
}

/// Errors that reach the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("upstream search unavailable: {0}")]
    UpstreamUnavailable(#[source] PlacesError),

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<PlacesError> for ApiError {
    fn from(e: PlacesError) -> Self {
        match e {
            PlacesError::NotFound(place_id) => {
                ApiError::NotFound(format!("No restaurant found with id {}", place_id))
            }
            other => ApiError::UpstreamUnavailable(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::UpstreamUnavailable(_) => {
                "An error occurred while fetching data".to_string()
            }
            other => other.to_string(),
        };

        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}
