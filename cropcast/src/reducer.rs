//! Reducer - (state, action) -> DispatchResult<Effect>
//!
//! All state mutations happen here and nothing else: no I/O, only a debug
//! line when a stale result is dropped. Fetches are requested by returning
//! effects; results are only applied when their ticket is the latest one
//! issued, so the last click always wins regardless of response order.

use cropcast_core::DispatchResult;
use tracing::debug;

use crate::action::Action;
use crate::effect::Effect;
use crate::geo::Coordinate;
use crate::layout::AppLayout;
use crate::state::{AppState, ForecastStatus};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Map actions =====
        Action::MapClick(at) => request_forecast(state, at),

        Action::MapPan(direction) => {
            let canvas = AppLayout::for_terminal(state.terminal_size, state.display).map_canvas();
            state.view.pan(direction, canvas);
            DispatchResult::changed()
        }

        Action::MapZoomIn => changed_if(state.view.zoom_in()),

        Action::MapZoomOut => changed_if(state.view.zoom_out()),

        Action::MapRecenter => {
            if state.view == state.home {
                return DispatchResult::unchanged();
            }
            state.view = state.home;
            DispatchResult::changed()
        }

        // ===== Forecast actions =====
        Action::ForecastRefresh => match state.selection {
            Some(at) => request_forecast(state, at),
            None => DispatchResult::unchanged(),
        },

        Action::ForecastDismiss => {
            if state.selection.is_none() && state.status == ForecastStatus::Idle {
                return DispatchResult::unchanged();
            }
            // Retire the outstanding ticket so a late response is dropped.
            state.latest_request = state.latest_request.next();
            state.selection = None;
            state.status = ForecastStatus::Idle;
            DispatchResult::changed_with(Effect::CancelForecast)
        }

        Action::ForecastDidLoad { ticket, result } => {
            if !ticket.is_current(state.latest_request) {
                debug!(%ticket, latest = %state.latest_request, "dropping stale forecast");
                return DispatchResult::unchanged();
            }
            state.status = ForecastStatus::Success(result);
            DispatchResult::changed()
        }

        Action::ForecastDidError { ticket, message } => {
            if !ticket.is_current(state.latest_request) {
                debug!(%ticket, latest = %state.latest_request, "dropping stale forecast error");
                return DispatchResult::unchanged();
            }
            state.status = ForecastStatus::Failure(message);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiCycleDisplay => {
            state.display = state.display.cycle();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            changed_if(std::mem::replace(&mut state.terminal_size, (width, height)) != (width, height))
        }

        // Quit is handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn request_forecast(state: &mut AppState, at: Coordinate) -> DispatchResult<Effect> {
    let ticket = state.latest_request.next();
    state.latest_request = ticket;
    state.selection = Some(at);
    state.status = ForecastStatus::Loading { at };
    DispatchResult::changed_with(Effect::FetchForecast { ticket, at })
}

fn changed_if(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}
