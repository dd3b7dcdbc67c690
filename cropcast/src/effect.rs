//! Effects - side effects declared by the reducer
//!
//! The reducer only describes work; [`ForecastEffects`] performs it by
//! spawning keyed tasks that report back with result actions.

use std::time::Duration;

use cropcast_core::{RequestTicket, TaskKey, TaskManager};
use tracing::{debug, warn};

use crate::action::Action;
use crate::api::{ForecastClient, ForecastError};
use crate::geo::Coordinate;

/// Key of the forecast task; a new fetch replaces the running one.
pub const FORECAST_TASK: &str = "forecast";

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the forecast for a clicked coordinate
    FetchForecast {
        ticket: RequestTicket,
        at: Coordinate,
    },
    /// Abort the in-flight fetch, if any
    CancelForecast,
}

/// Runs forecast effects against a [`ForecastClient`].
#[derive(Clone, Debug)]
pub struct ForecastEffects {
    client: ForecastClient,
    timeout: Option<Duration>,
}

impl ForecastEffects {
    pub fn new(client: ForecastClient, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }

    pub fn handle(&self, effect: Effect, tasks: &mut TaskManager<Action>) {
        match effect {
            Effect::FetchForecast { ticket, at } => {
                let client = self.client.clone();
                let timeout = self.timeout;
                tasks.spawn(FORECAST_TASK, async move {
                    match fetch_with_timeout(&client, at, timeout).await {
                        Ok(result) => {
                            debug!(%ticket, "forecast loaded");
                            Action::ForecastDidLoad { ticket, result }
                        }
                        Err(e) => {
                            warn!(%ticket, kind = e.kind().as_str(), error = ?e, "forecast fetch failed");
                            Action::ForecastDidError {
                                ticket,
                                message: e.user_message().to_string(),
                            }
                        }
                    }
                });
            }
            Effect::CancelForecast => {
                tasks.cancel(&TaskKey::new(FORECAST_TASK));
            }
        }
    }
}

async fn fetch_with_timeout(
    client: &ForecastClient,
    at: Coordinate,
    timeout: Option<Duration>,
) -> Result<crate::state::ForecastResult, ForecastError> {
    let fetch = client.fetch_forecast(at.lat, at.lon);
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fetch)
            .await
            .map_err(|_| ForecastError::Timeout(limit))?,
        None => fetch.await,
    }
}
