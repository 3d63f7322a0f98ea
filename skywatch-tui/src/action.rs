//! Actions - every way the state can be asked to change.
//!
//! Naming convention: an intent verb starts an async operation
//! (`WeatherFetch`), a `Did` action carries its result back
//! (`WeatherDidLoad`, `WeatherDidError`).

use skywatch_core::WeatherSnapshot;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Intent: fetch current weather for a city name.
    WeatherFetch(String),
    /// Result: the fetch settled successfully.
    WeatherDidLoad(WeatherSnapshot),
    /// Result: the fetch settled with a user-facing message.
    WeatherDidError(String),

    /// The search input's value changed.
    SearchInputChange(String),
    /// Enter was pressed in the search input.
    SearchSubmit(String),

    /// The history selection moved (or Enter confirmed the current row).
    HistorySelect(usize),
    /// Fetch the history entry at the given index.
    HistoryFetch(usize),

    /// Tab: move focus between input and history list.
    FocusNext,

    /// Periodic tick for the loading animation.
    Tick,

    /// Exit the application.
    Quit,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::WeatherFetch(_) => "WeatherFetch",
            Action::WeatherDidLoad(_) => "WeatherDidLoad",
            Action::WeatherDidError(_) => "WeatherDidError",
            Action::SearchInputChange(_) => "SearchInputChange",
            Action::SearchSubmit(_) => "SearchSubmit",
            Action::HistorySelect(_) => "HistorySelect",
            Action::HistoryFetch(_) => "HistoryFetch",
            Action::FocusNext => "FocusNext",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    /// Concise form for dispatch logging; data-heavy variants are compressed.
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad(snapshot) => format!(
                "WeatherDidLoad {{ city: {:?}, temp: {:.1}°C }}",
                snapshot.city_name, snapshot.temperature_celsius
            ),
            Action::WeatherDidError(message) => {
                let short = if message.len() > 40 {
                    format!("{}...", message.chars().take(37).collect::<String>())
                } else {
                    message.clone()
                };
                format!("WeatherDidError({short:?})")
            }
            _ => format!("{self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_truncates_long_errors() {
        let action = Action::WeatherDidError("x".repeat(100));
        assert!(action.summary().len() < 60);
        assert!(action.summary().contains("..."));
    }

    #[test]
    fn summary_passes_short_actions_through() {
        assert_eq!(Action::Tick.summary(), "Tick");
    }
}
