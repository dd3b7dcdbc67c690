//! Forecast service client
//!
//! One call is one `GET <base>/forecast?lat=..&lon=..`. The client never
//! retries and applies no timeout of its own; callers that want a deadline
//! wrap the future (see [`crate::effect`]).

use std::time::Duration;

use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use crate::state::ForecastResult;

/// The only message shown to the user when a fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch forecast.";

/// Broad classification of a failed fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, timeout or non-2xx status
    Network,
    /// Body was not the expected JSON
    Parse,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Parse => "parse",
        }
    }
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("forecast service responded with {0}")]
    Status(StatusCode),

    #[error("forecast request failed")]
    Transport(#[source] reqwest::Error),

    #[error("forecast request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid forecast payload")]
    Parse(#[from] serde_json::Error),
}

impl ForecastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastError::Status(_) | ForecastError::Transport(_) | ForecastError::Timeout(_) => {
                ErrorKind::Network
            }
            ForecastError::Parse(_) => ErrorKind::Parse,
        }
    }

    /// What the user sees, regardless of the cause.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// HTTP client for the forecast service. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ForecastClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ForecastClient {
    /// `endpoint` is the full forecast URL, see [`crate::config::forecast_endpoint`].
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the forecast for a coordinate.
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastResult, ForecastError> {
        debug!(endpoint = %self.endpoint, lat, lon, "requesting forecast");

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            .send()
            .await
            .map_err(ForecastError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::Status(status));
        }

        let body = response.bytes().await.map_err(ForecastError::Transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ForecastError::Status(StatusCode::INTERNAL_SERVER_ERROR).kind(),
            ErrorKind::Network
        );
        assert_eq!(
            ForecastError::Timeout(Duration::from_secs(1)).kind(),
            ErrorKind::Network
        );

        let parse = serde_json::from_str::<ForecastResult>("nope").unwrap_err();
        let err = ForecastError::from(parse);
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.user_message(), "Failed to fetch forecast.");
    }
}
