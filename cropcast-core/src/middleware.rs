//! Store middleware: hooks that observe every dispatched action

use crate::action::ActionSummary;
use crate::Action;

/// Intercepts actions before and after the reducer runs.
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer, with whether the state changed
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that records every processed action as a `tracing` event.
///
/// Emits at `debug` level under the `cropcast::actions` target, using
/// [`ActionSummary`] so large payloads stay readable in the log file.
/// The pre-reducer line is `trace` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl TracingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<A: ActionSummary> Middleware<A> for TracingMiddleware {
    fn before(&mut self, action: &A) {
        tracing::trace!(
            target: "cropcast::actions",
            action = %action.name(),
            "dispatching"
        );
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        tracing::debug!(
            target: "cropcast::actions",
            action = %action.name(),
            summary = %action.summary(),
            state_changed,
            "processed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Ping;

    impl Action for Ping {
        fn name(&self) -> &'static str {
            "Ping"
        }
    }

    impl ActionSummary for Ping {}

    #[test]
    fn test_default_summary_uses_debug() {
        assert_eq!(Ping.summary(), "Ping");
    }

    #[test]
    fn test_tracing_middleware_without_subscriber() {
        let mut middleware = TracingMiddleware::new();
        middleware.before(&Ping);
        middleware.after(&Ping, true);
    }
}
