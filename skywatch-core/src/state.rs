//! Weather state - single source of truth for fetched data
//!
//! Fields are `pub(crate)` so that only the transition function in
//! [`crate::store`] can mutate them; everything outside this crate reads
//! through the accessors.

use crate::history::SearchHistory;

/// One fetched weather result for a city at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub temperature_celsius: f64,
    /// Provider icon code, e.g. `"01d"`.
    pub condition_code: String,
    pub condition_description: String,
    pub humidity_percent: u8,
    pub wind_speed_mps: f64,
}

/// The process-wide weather state.
///
/// `error` and `data` are deliberately not mutually exclusive: a failed fetch
/// leaves the previous snapshot in place while setting the new error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherState {
    pub(crate) data: Option<WeatherSnapshot>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) history: SearchHistory,
}

impl WeatherState {
    /// State seeded with a previously persisted history.
    pub fn with_history(history: SearchHistory) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    /// Last successfully fetched snapshot, if any.
    pub fn data(&self) -> Option<&WeatherSnapshot> {
        self.data.as_ref()
    }

    /// True exactly while a fetch is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Last failure's user-facing message; cleared when a new fetch starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Recent searches, most-recent-first.
    pub fn history(&self) -> &SearchHistory {
        &self.history
    }
}
