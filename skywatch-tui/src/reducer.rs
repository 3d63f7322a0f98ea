//! Reducer - the one exhaustive transition function.
//!
//! Weather lifecycle actions delegate to the core transition function; UI
//! actions are handled here. No side effects happen in this file - the
//! returned [`DispatchResult`] carries them as data.

use skywatch_core::{apply, FetchEvent};

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::state::{AppState, Focus};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult {
    match action {
        Action::WeatherFetch(city) => start_fetch(state, &city),

        Action::SearchSubmit(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return DispatchResult::unchanged();
            }
            let city = trimmed.to_string();
            state.search_input.clear();
            start_fetch(state, &city)
        }

        Action::WeatherDidLoad(snapshot) => {
            let applied = apply(&mut state.weather, FetchEvent::Loaded(snapshot));
            state.clamp_history_selection();
            if applied.history_recorded {
                DispatchResult::changed_with(Effect::PersistHistory {
                    entries: state.weather.history().entries().to_vec(),
                })
            } else {
                DispatchResult::changed()
            }
        }

        Action::WeatherDidError(message) => {
            let _ = apply(&mut state.weather, FetchEvent::Failed(message));
            DispatchResult::changed()
        }

        Action::SearchInputChange(value) => {
            if state.search_input == value {
                return DispatchResult::unchanged();
            }
            state.search_input = value;
            DispatchResult::changed()
        }

        Action::HistorySelect(index) => {
            let len = state.weather.history().len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let index = index.min(len - 1);
            if state.history_selected == index {
                return DispatchResult::unchanged();
            }
            state.history_selected = index;
            DispatchResult::changed()
        }

        Action::HistoryFetch(index) => match state.weather.history().get(index) {
            Some(city) => {
                let city = city.to_string();
                start_fetch(state, &city)
            }
            None => DispatchResult::unchanged(),
        },

        Action::FocusNext => {
            let next = match state.focus {
                Focus::Search if !state.weather.history().is_empty() => Focus::History,
                Focus::Search => return DispatchResult::unchanged(),
                Focus::History => Focus::Search,
            };
            state.focus = next;
            state.clamp_history_selection();
            DispatchResult::changed()
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only re-render while the spinner is visible.
            if state.weather.loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn start_fetch(state: &mut AppState, city: &str) -> DispatchResult {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return DispatchResult::unchanged();
    }
    let _ = apply(&mut state.weather, FetchEvent::Started);
    DispatchResult::changed_with(Effect::FetchWeather {
        city: trimmed.to_string(),
    })
}
