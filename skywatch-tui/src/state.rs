//! Application state - everything the UI needs to render.
//!
//! Weather data lives in the core [`WeatherState`] and is only mutated
//! through its transition function; the fields here are UI chrome.

use skywatch_core::WeatherState;

/// Which widget receives key input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Search,
    History,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Fetched data, loading flag, error, history.
    pub weather: WeatherState,

    /// Current contents of the search input.
    pub search_input: String,

    /// Focused widget. History focus is skipped while the history is empty.
    pub focus: Focus,

    /// Selected index in the history list.
    pub history_selected: usize,

    /// Animation frame counter for the loading spinner.
    pub tick_count: u32,
}

impl AppState {
    pub fn new(weather: WeatherState) -> Self {
        Self {
            weather,
            ..Self::default()
        }
    }

    /// Keep the history selection inside bounds after the list changed.
    pub fn clamp_history_selection(&mut self) {
        let len = self.weather.history().len();
        if len == 0 {
            self.history_selected = 0;
        } else if self.history_selected >= len {
            self.history_selected = len - 1;
        }
    }
}
