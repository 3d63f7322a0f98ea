//! Fetch lifecycle transitions over [`WeatherState`].
//!
//! `apply` is the only writer of weather state. It is a pure function of
//! (state, event); persistence of the history happens outside, driven by the
//! [`FetchApplied`] result (inline path) and the
//! [`HistoryBridge`](crate::persist::HistoryBridge) watcher (sync path).

use crate::state::{WeatherSnapshot, WeatherState};

/// The three lifecycle events of one fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchEvent {
    /// A fetch was dispatched.
    Started,
    /// The fetch settled successfully.
    Loaded(WeatherSnapshot),
    /// The fetch settled with a user-facing error message.
    Failed(String),
}

impl FetchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FetchEvent::Started => "Started",
            FetchEvent::Loaded(_) => "Loaded",
            FetchEvent::Failed(_) => "Failed",
        }
    }
}

/// Outcome of applying one [`FetchEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct FetchApplied {
    /// Whether the state changed (a re-render is needed).
    pub changed: bool,
    /// Whether a new city was inserted into the history. When true the caller
    /// must persist the history immediately (the inline write path).
    pub history_recorded: bool,
}

impl FetchApplied {
    fn changed() -> Self {
        Self {
            changed: true,
            history_recorded: false,
        }
    }
}

/// Apply one fetch lifecycle event.
///
/// - `Started`: `loading = true`, `error` cleared; data and history untouched.
/// - `Loaded`: `loading = false`, snapshot stored; the city is recorded in the
///   history unless already present (no promotion).
/// - `Failed`: `loading = false`, error stored; a stale snapshot from an
///   earlier success stays visible.
pub fn apply(state: &mut WeatherState, event: FetchEvent) -> FetchApplied {
    let name = event.name();
    let applied = match event {
        FetchEvent::Started => {
            state.loading = true;
            state.error = None;
            FetchApplied::changed()
        }
        FetchEvent::Loaded(snapshot) => {
            state.loading = false;
            let history_recorded = state.history.record(&snapshot.city_name);
            state.data = Some(snapshot);
            FetchApplied {
                changed: true,
                history_recorded,
            }
        }
        FetchEvent::Failed(message) => {
            state.loading = false;
            state.error = Some(message);
            FetchApplied::changed()
        }
    };
    tracing::debug!(
        event = name,
        history_recorded = applied.history_recorded,
        "fetch event applied"
    );
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::SearchHistory;

    fn snapshot(city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city_name: city.to_string(),
            temperature_celsius: 21.3,
            condition_code: "01d".to_string(),
            condition_description: "clear sky".to_string(),
            humidity_percent: 40,
            wind_speed_mps: 3.1,
        }
    }

    #[test]
    fn started_sets_loading_and_clears_error() {
        let mut state = WeatherState::default();
        state.error = Some("old error".into());

        let applied = apply(&mut state, FetchEvent::Started);

        assert!(applied.changed);
        assert!(state.loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn loaded_stores_snapshot_and_records_history() {
        let mut state = WeatherState::default();
        let _ = apply(&mut state, FetchEvent::Started);

        let applied = apply(&mut state, FetchEvent::Loaded(snapshot("London")));

        assert!(applied.changed);
        assert!(applied.history_recorded);
        assert!(!state.loading());
        assert!(state.error().is_none());
        assert_eq!(state.data().unwrap().city_name, "London");
        assert_eq!(state.history().entries(), ["london"]);
    }

    #[test]
    fn loaded_known_city_does_not_reorder_history() {
        let history = SearchHistory::from_entries(["paris", "london"]);
        let mut state = WeatherState::with_history(history);

        let applied = apply(&mut state, FetchEvent::Loaded(snapshot("Paris")));

        assert!(!applied.history_recorded);
        assert_eq!(state.history().entries(), ["paris", "london"]);
    }

    #[test]
    fn six_distinct_cities_keep_five_most_recent() {
        let mut state = WeatherState::default();
        for city in ["a", "b", "c", "d", "e", "f"] {
            let _ = apply(&mut state, FetchEvent::Started);
            let applied = apply(&mut state, FetchEvent::Loaded(snapshot(city)));
            assert!(applied.history_recorded);
        }
        assert_eq!(state.history().entries(), ["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn failed_keeps_stale_data_alongside_error() {
        let mut state = WeatherState::default();
        let _ = apply(&mut state, FetchEvent::Started);
        let _ = apply(&mut state, FetchEvent::Loaded(snapshot("London")));

        let _ = apply(&mut state, FetchEvent::Started);
        let applied = apply(&mut state, FetchEvent::Failed("city not found".into()));

        assert!(applied.changed);
        assert!(!state.loading());
        assert_eq!(state.data().unwrap().city_name, "London");
        assert_eq!(state.error(), Some("city not found"));
        assert_eq!(state.history().entries(), ["london"]);
    }

    #[test]
    fn loading_true_only_between_start_and_settle() {
        let mut state = WeatherState::default();
        assert!(!state.loading());

        let _ = apply(&mut state, FetchEvent::Started);
        assert!(state.loading());

        let _ = apply(&mut state, FetchEvent::Failed("boom".into()));
        assert!(!state.loading());

        let _ = apply(&mut state, FetchEvent::Started);
        assert!(state.loading());

        let _ = apply(&mut state, FetchEvent::Loaded(snapshot("Kyiv")));
        assert!(!state.loading());
    }
}
