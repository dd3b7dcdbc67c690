//! Core runtime for the cropcast map widget
//!
//! A small Redux/Elm-style architecture for terminal UIs:
//!
//! - **Action**: Events that describe state changes
//! - **EffectStore**: State container whose reducer returns effects
//! - **Component**: Pure UI elements that render based on props
//! - **EventBus**: Listener registration and pointer hit-testing
//! - **TaskManager**: Keyed async tasks plus request tickets
//! - **EffectRuntime**: The event/action/render loop
//!
//! # Async Handler Pattern
//!
//! Async work uses two-phase actions:
//!
//! 1. **Intent actions** make the reducer emit an effect (e.g. `MapClick`)
//! 2. **Result actions** carry the outcome back (e.g. `ForecastDidLoad`)
//!
//! ```ignore
//! fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
//!     match effect {
//!         Effect::FetchForecast { ticket, at } => {
//!             ctx.tasks().spawn("forecast", async move {
//!                 match client.fetch_forecast(at.lat, at.lon).await {
//!                     Ok(result) => Action::ForecastDidLoad { ticket, result },
//!                     Err(e) => Action::ForecastDidError { ticket, message: e.to_string() },
//!                 }
//!             });
//!         }
//!     }
//! }
//! ```
//!
//! The `Did*` naming convention identifies result actions.

pub mod action;
pub mod bus;
pub mod component;
pub mod effect;
pub mod event;
pub mod middleware;
pub mod runtime;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionSummary};
pub use component::Component;

pub use bus::{process_raw_event, spawn_event_poller, EventBus, RawEvent};
pub use event::{area_contains, ComponentId, EventKind, EventType};

pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use middleware::{Middleware, TracingMiddleware};

pub use runtime::{EffectContext, EffectRuntime, EffectStoreLike, EventOutcome};
pub use tasks::{RequestTicket, TaskKey, TaskManager};

pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};
