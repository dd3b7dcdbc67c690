//! Application state - single source of truth
//!
//! Components receive `&AppState` through their props; only the reducer
//! mutates it.

use cropcast_core::RequestTicket;
use serde::{Deserialize, Serialize};

use crate::config::{Basemap, DisplayMode};
use crate::geo::{Coordinate, MapView};

/// Location echoed back by the forecast service.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Forecast payload returned by `GET /forecast`.
///
/// ```json
/// { "location": { "lat": 14.0, "lon": 121.0 },
///   "dailyTemperatures": [30.0, 31.5],
///   "suggestions": ["rice", "corn"] }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub location: ForecastLocation,
    /// Daily maximum temperatures in °C, first entry is today.
    pub daily_temperatures: Vec<f64>,
    /// Suggested crops in the order the service ranked them.
    pub suggestions: Vec<String>,
}

impl ForecastResult {
    /// Temperature shown as the headline value: the first day of the series.
    pub fn representative_temperature(&self) -> Option<f64> {
        self.daily_temperatures.first().copied()
    }
}

/// Where the forecast request for the current selection stands.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ForecastStatus {
    /// Nothing clicked yet (or the selection was dismissed)
    #[default]
    Idle,
    Loading {
        at: Coordinate,
    },
    Success(ForecastResult),
    Failure(String),
}

impl ForecastStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ForecastStatus::Loading { .. })
    }

    pub fn result(&self) -> Option<&ForecastResult> {
        match self {
            ForecastStatus::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ForecastStatus::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    /// Center and zoom of the map
    pub view: MapView,

    /// View restored by the recenter key
    pub home: MapView,

    pub basemap: Basemap,

    /// Last clicked coordinate; anchors the marker and the popup
    pub selection: Option<Coordinate>,

    pub status: ForecastStatus,

    /// Ticket of the most recently issued forecast request
    pub latest_request: RequestTicket,

    pub display: DisplayMode,

    /// Terminal dimensions
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(view: MapView, basemap: Basemap, display: DisplayMode) -> Self {
        Self {
            view,
            home: view,
            basemap,
            selection: None,
            status: ForecastStatus::Idle,
            latest_request: RequestTicket::default(),
            display,
            terminal_size: (80, 24),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MapView::default(), Basemap::default(), DisplayMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_payload() {
        let body = r#"{
            "location": {"lat": 14, "lon": 121},
            "dailyTemperatures": [30, 31.5],
            "suggestions": ["rice", "corn"],
            "source": "ignored"
        }"#;

        let result: ForecastResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.location, ForecastLocation { lat: 14.0, lon: 121.0 });
        assert_eq!(result.daily_temperatures, vec![30.0, 31.5]);
        assert_eq!(result.suggestions, vec!["rice", "corn"]);
        assert_eq!(result.representative_temperature(), Some(30.0));
    }

    #[test]
    fn test_legacy_shapes_are_rejected() {
        let scalar = r#"{"temperature": 30, "lat": 14, "lon": 121, "suggestions": []}"#;
        assert!(serde_json::from_str::<ForecastResult>(scalar).is_err());

        let series = r#"{"forecast": [30], "location": {"lat": 14, "lon": 121}, "recommended": []}"#;
        assert!(serde_json::from_str::<ForecastResult>(series).is_err());
    }

    #[test]
    fn test_status_accessors_are_exclusive() {
        let failure = ForecastStatus::Failure("boom".into());
        assert_eq!(failure.error(), Some("boom"));
        assert!(failure.result().is_none());

        let loading = ForecastStatus::Loading {
            at: crate::geo::DEFAULT_CENTER,
        };
        assert!(loading.is_loading());
        assert!(loading.error().is_none());
    }
}
