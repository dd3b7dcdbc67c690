//! cropcast - click a location on a terminal map, get a forecast and crop
//! suggestions for it
//!
//! Data flow:
//! 1. A mouse click on the map surface becomes `Action::MapClick`
//! 2. The reducer issues a request ticket and returns `Effect::FetchForecast`
//! 3. [`effect::ForecastEffects`] runs the fetch as a keyed task
//! 4. The task reports `ForecastDidLoad` / `ForecastDidError` with its ticket
//! 5. The reducer applies the result only if the ticket is still current

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod geo;
pub mod layout;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod ui;

pub use action::Action;
pub use api::{ErrorKind, ForecastClient, ForecastError, FETCH_FAILED_MESSAGE};
pub use config::{Args, Basemap, Config, ConfigError, DisplayMode};
pub use effect::{Effect, ForecastEffects};
pub use geo::{Coordinate, MapView};
pub use reducer::reducer;
pub use state::{AppState, ForecastLocation, ForecastResult, ForecastStatus};
pub use ui::ForecastUi;
