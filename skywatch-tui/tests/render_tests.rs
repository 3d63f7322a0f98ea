//! Render assertions via the off-screen harness.

use skywatch_core::{SearchHistory, WeatherSnapshot, WeatherState};
use skywatch_tui::components::{
    Component, HistoryPanel, HistoryPanelProps, SearchBar, SearchBarProps, WeatherPanel,
    WeatherPanelProps,
};
use skywatch_tui::state::{AppState, Focus};
use skywatch_tui::testing::RenderHarness;
use skywatch_tui::ui::Ui;

fn snapshot(city: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        city_name: city.to_string(),
        temperature_celsius: 22.5,
        condition_code: "01d".to_string(),
        condition_description: "clear sky".to_string(),
        humidity_percent: 40,
        wind_speed_mps: 3.6,
    }
}

fn state_after_success(city: &str) -> AppState {
    let mut state = AppState::default();
    let _ = skywatch_core::apply(&mut state.weather, skywatch_core::FetchEvent::Started);
    let _ = skywatch_core::apply(
        &mut state.weather,
        skywatch_core::FetchEvent::Loaded(snapshot(city)),
    );
    state
}

#[test]
fn weather_panel_initial_prompt() {
    let mut render = RenderHarness::new(60, 20);
    let mut panel = WeatherPanel::default();
    let state = AppState::default();

    let output = render.render_to_string_plain(|frame| {
        panel.render(frame, frame.area(), WeatherPanelProps { state: &state });
    });

    assert!(output.contains("to fetch weather"));
}

#[test]
fn weather_panel_loading_spinner() {
    let mut render = RenderHarness::new(60, 20);
    let mut panel = WeatherPanel::default();

    let mut state = AppState::default();
    let _ = skywatch_core::apply(&mut state.weather, skywatch_core::FetchEvent::Started);

    let output = render.render_to_string_plain(|frame| {
        panel.render(frame, frame.area(), WeatherPanelProps { state: &state });
    });

    assert!(output.contains("Fetching weather"));
}

#[test]
fn weather_panel_shows_snapshot() {
    let mut render = RenderHarness::new(60, 20);
    let mut panel = WeatherPanel::default();
    let state = state_after_success("London");

    let output = render.render_to_string_plain(|frame| {
        panel.render(frame, frame.area(), WeatherPanelProps { state: &state });
    });

    assert!(output.contains("London"));
    assert!(output.contains("22.5°C"));
    assert!(output.contains("clear sky"));
    assert!(output.contains("40%"));
    assert!(output.contains("3.6 m/s"));
}

#[test]
fn weather_panel_shows_error() {
    let mut render = RenderHarness::new(60, 20);
    let mut panel = WeatherPanel::default();

    let mut state = AppState::default();
    let _ = skywatch_core::apply(&mut state.weather, skywatch_core::FetchEvent::Started);
    let _ = skywatch_core::apply(
        &mut state.weather,
        skywatch_core::FetchEvent::Failed("city not found".into()),
    );

    let output = render.render_to_string_plain(|frame| {
        panel.render(frame, frame.area(), WeatherPanelProps { state: &state });
    });

    assert!(output.contains("Error"));
    assert!(output.contains("city not found"));
}

#[test]
fn history_panel_lists_entries() {
    let mut render = RenderHarness::new(30, 10);
    let mut panel = HistoryPanel::new();
    let entries: Vec<String> = vec!["paris".into(), "london".into()];

    let output = render.render_to_string_plain(|frame| {
        panel.render(
            frame,
            frame.area(),
            HistoryPanelProps {
                entries: &entries,
                selected: 0,
                is_focused: true,
            },
        );
    });

    assert!(output.contains("Recent Searches"));
    assert!(output.contains("paris"));
    assert!(output.contains("london"));
}

#[test]
fn search_bar_placeholder_and_value() {
    let mut render = RenderHarness::new(40, 3);
    let mut input = SearchBar::new();

    let output = render.render_to_string_plain(|frame| {
        input.render(
            frame,
            frame.area(),
            SearchBarProps {
                value: "",
                is_focused: true,
            },
        );
    });
    assert!(output.contains("Enter city name"));

    let output = render.render_to_string_plain(|frame| {
        input.render(
            frame,
            frame.area(),
            SearchBarProps {
                value: "Lond",
                is_focused: true,
            },
        );
    });
    assert!(output.contains("Lond"));
}

#[test]
fn full_ui_hides_history_when_empty() {
    let mut render = RenderHarness::new(80, 24);
    let mut ui = Ui::new();
    let state = AppState::default();

    let output = render.render_to_string_plain(|frame| {
        ui.render(frame, frame.area(), &state);
    });

    assert!(output.contains("Search"));
    assert!(!output.contains("Recent Searches"));
    assert!(output.contains("quit"));
}

#[test]
fn full_ui_shows_history_panel() {
    let mut render = RenderHarness::new(80, 24);
    let mut ui = Ui::new();

    let history = SearchHistory::from_entries(["paris", "london"]);
    let mut state = AppState::new(WeatherState::with_history(history));
    state.focus = Focus::History;

    let output = render.render_to_string_plain(|frame| {
        ui.render(frame, frame.area(), &state);
    });

    assert!(output.contains("Recent Searches"));
    assert!(output.contains("paris"));
    assert!(output.contains("london"));
}

#[test]
fn full_ui_stale_data_replaced_by_error_view() {
    let mut render = RenderHarness::new(80, 24);
    let mut ui = Ui::new();

    let mut state = state_after_success("London");
    let _ = skywatch_core::apply(&mut state.weather, skywatch_core::FetchEvent::Started);
    let _ = skywatch_core::apply(
        &mut state.weather,
        skywatch_core::FetchEvent::Failed("city not found".into()),
    );

    let output = render.render_to_string_plain(|frame| {
        ui.render(frame, frame.area(), &state);
    });

    // The error view owns the panel, but the stale snapshot is still in
    // state and the history still lists the earlier success.
    assert!(output.contains("city not found"));
    assert!(output.contains("london"));
    assert_eq!(state.weather.data().unwrap().city_name, "London");
}
