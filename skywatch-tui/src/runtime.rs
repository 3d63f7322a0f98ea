//! The event/action loop.
//!
//! One consumer loop selects over terminal events, dispatched actions and the
//! tick timer. Every reducer call runs on this loop, so state transitions are
//! atomic with respect to each other; the fetch tasks are the only other
//! concurrency, and they re-enter the loop through the action channel.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use skywatch_core::{HistoryBridge, KeyValueStore, WeatherClient, WeatherState};

use crate::action::Action;
use crate::effect::Effect;
use crate::event::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent};
use crate::reducer::reducer;
use crate::state::AppState;
use crate::ui::Ui;

/// Cadence of the loading-spinner animation.
const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

/// Owns the state, the action channel, the fetch client and the persistence
/// bridge; drives the loop until `Quit`.
pub struct Runtime<S: KeyValueStore> {
    state: AppState,
    client: WeatherClient,
    bridge: HistoryBridge<S>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    poller_config: PollerConfig,
    should_render: bool,
}

impl<S: KeyValueStore> Runtime<S> {
    /// Build the runtime, seeding the weather state from the persisted
    /// history.
    pub fn new(client: WeatherClient, mut bridge: HistoryBridge<S>) -> Self {
        let history = bridge.load();
        let state = AppState::new(WeatherState::with_history(history));
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            state,
            client,
            bridge,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
        }
    }

    pub fn with_poller_config(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Send an action into the queue (used to kick off a startup fetch).
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run until a `Quit` action arrives.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        ui: &mut Ui,
    ) -> io::Result<()> {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, self.poller_config, cancel_token.clone());
        let mut tick = tokio::time::interval(TICK_INTERVAL);

        loop {
            if self.should_render {
                terminal.draw(|frame| ui.render(frame, frame.area(), &self.state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome = ui.map_event(&event, &self.state);
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if matches!(action, Action::Quit) {
                        break;
                    }
                    tracing::debug!(action = %action.summary(), "dispatch");

                    let result = reducer(&mut self.state, action);
                    for effect in result.effects {
                        self.handle_effect(effect);
                    }
                    // Watcher path: persist whenever the history changed,
                    // regardless of which action changed it.
                    if self.bridge.sync(self.state.weather.history()) {
                        tracing::debug!("history watcher persisted");
                    }
                    self.should_render = result.changed;
                }

                _ = tick.tick() => {
                    let _ = self.action_tx.send(Action::Tick);
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        Ok(())
    }

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchWeather { city } => {
                // Each fetch is an independent detached task. Overlapping
                // fetches are not cancelled or de-duplicated; the last one to
                // settle wins.
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let action = match client.current_weather(&city).await {
                        Ok(snapshot) => Action::WeatherDidLoad(snapshot),
                        Err(err) => Action::WeatherDidError(err.to_string()),
                    };
                    let _ = tx.send(action);
                });
            }
            Effect::PersistHistory { entries } => {
                // Inline path: write immediately after a success recorded a
                // new city.
                self.bridge.write(&entries);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use skywatch_core::MemoryStore;

    fn runtime() -> Runtime<MemoryStore> {
        Runtime::new(
            WeatherClient::new(None),
            HistoryBridge::new(MemoryStore::new()),
        )
    }

    #[test]
    fn seeds_history_from_bridge() {
        let mut kv = MemoryStore::new();
        kv.put(skywatch_core::HISTORY_KEY, r#"["paris","london"]"#);

        let rt = Runtime::new(WeatherClient::new(None), HistoryBridge::new(kv));
        assert_eq!(rt.state().weather.history().entries(), ["paris", "london"]);
    }

    #[tokio::test]
    async fn run_exits_on_quit() {
        let mut rt = runtime();
        rt.enqueue(Action::Quit);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut ui = Ui::new();

        tokio::time::timeout(Duration::from_secs(2), rt.run(&mut terminal, &mut ui))
            .await
            .expect("runtime must exit on Quit")
            .expect("runtime loop failed");
    }

    #[tokio::test]
    async fn missing_api_key_fetch_settles_with_error() {
        let mut rt = runtime();
        rt.enqueue(Action::WeatherFetch("London".into()));

        // Let the fetch settle, then stop the loop.
        let tx = rt.action_tx();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            let _ = tx.send(Action::Quit);
        });

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut ui = Ui::new();
        tokio::time::timeout(Duration::from_secs(5), rt.run(&mut terminal, &mut ui))
            .await
            .expect("runtime must exit")
            .expect("runtime loop failed");

        assert_eq!(
            rt.state().weather.error(),
            Some("API key is missing or not loaded correctly")
        );
        assert!(!rt.state().weather.loading());
        assert!(rt.state().weather.history().is_empty());
    }
}
