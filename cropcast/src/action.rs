//! Actions
//!
//! Naming follows the intent/result split: `MapClick` is an intent that
//! makes the reducer emit a fetch, `ForecastDidLoad` / `ForecastDidError`
//! carry the outcome back. Result actions carry the [`RequestTicket`] of the
//! request they answer.

use cropcast_core::{ActionSummary, RequestTicket};

use crate::geo::{Coordinate, Pan};
use crate::state::ForecastResult;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Map =====
    /// A location on the map was clicked
    MapClick(Coordinate),

    MapPan(Pan),

    MapZoomIn,

    MapZoomOut,

    /// Return to the configured default view
    MapRecenter,

    // ===== Forecast =====
    /// Fetch again for the current selection
    ForecastRefresh,

    /// Drop the selection and whatever is shown for it
    ForecastDismiss,

    ForecastDidLoad {
        ticket: RequestTicket,
        result: ForecastResult,
    },

    ForecastDidError {
        ticket: RequestTicket,
        message: String,
    },

    // ===== UI =====
    /// Cycle inline / popup / both
    UiCycleDisplay,

    UiTerminalResize(u16, u16),

    Quit,
}

impl cropcast_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::MapClick(_) => "MapClick",
            Action::MapPan(_) => "MapPan",
            Action::MapZoomIn => "MapZoomIn",
            Action::MapZoomOut => "MapZoomOut",
            Action::MapRecenter => "MapRecenter",
            Action::ForecastRefresh => "ForecastRefresh",
            Action::ForecastDismiss => "ForecastDismiss",
            Action::ForecastDidLoad { .. } => "ForecastDidLoad",
            Action::ForecastDidError { .. } => "ForecastDidError",
            Action::UiCycleDisplay => "UiCycleDisplay",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::Quit => "Quit",
        }
    }
}

/// Concise log lines for data-heavy actions
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::MapClick(at) => format!("MapClick({at})"),
            Action::ForecastDidLoad { ticket, result } => format!(
                "ForecastDidLoad {{ ticket: {ticket}, days: {}, suggestions: {} }}",
                result.daily_temperatures.len(),
                result.suggestions.len()
            ),
            Action::ForecastDidError { ticket, message } => {
                format!("ForecastDidError {{ ticket: {ticket}, message: {message:?} }}")
            }
            _ => format!("{:?}", self),
        }
    }
}
