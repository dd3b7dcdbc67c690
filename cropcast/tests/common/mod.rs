//! Store, effect handler and task manager wired against a mock service

use std::time::Duration;

use tokio::sync::mpsc;
use wiremock::MockServer;

use cropcast::config::{forecast_endpoint, parse_base_url};
use cropcast::{reducer, Action, AppState, Effect, ForecastClient, ForecastEffects};
use cropcast_core::{EffectStore, TaskManager};

/// Store, effect handler and task manager wired the way the runtime wires
/// them, without a terminal.
pub struct Harness {
    store: EffectStore<AppState, Action, Effect>,
    effects: ForecastEffects,
    pub tasks: TaskManager<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Harness {
    pub fn new(server: &MockServer, timeout: Option<Duration>) -> Self {
        let base = parse_base_url(&server.uri()).unwrap();
        let client = ForecastClient::new(forecast_endpoint(&base).unwrap());
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store: EffectStore::new(AppState::default(), reducer),
            effects: ForecastEffects::new(client, timeout),
            tasks: TaskManager::new(tx),
            rx,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.effects.handle(effect, &mut self.tasks);
        }
    }

    pub async fn next_action(&mut self, wait: Duration) -> Option<Action> {
        tokio::time::timeout(wait, self.rx.recv()).await.ok().flatten()
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }
}
