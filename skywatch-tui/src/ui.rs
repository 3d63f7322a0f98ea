//! Root UI: owns the component tree, lays out the screen and routes events.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::action::Action;
use crate::components::{
    Component, HelpBar, HelpBarProps, HistoryPanel, HistoryPanelProps, SearchBar, SearchBarProps,
    WeatherPanel, WeatherPanelProps,
};
use crate::event::EventKind;
use crate::runtime::EventOutcome;
use crate::state::{AppState, Focus};

pub struct Ui {
    search: SearchBar,
    history: HistoryPanel,
    weather: WeatherPanel,
    help: HelpBar,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            search: SearchBar::new(),
            history: HistoryPanel::new(),
            weather: WeatherPanel,
            help: HelpBar,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // search input
            Constraint::Min(5),    // weather + history
            Constraint::Length(1), // help bar
        ])
        .split(area);

        self.search.render(
            frame,
            chunks[0],
            SearchBarProps {
                value: &state.search_input,
                is_focused: state.focus == Focus::Search,
            },
        );

        let history = state.weather.history();
        if history.is_empty() {
            self.weather
                .render(frame, chunks[1], WeatherPanelProps { state });
        } else {
            let middle = Layout::horizontal([Constraint::Min(30), Constraint::Length(24)])
                .split(chunks[1]);
            self.weather
                .render(frame, middle[0], WeatherPanelProps { state });
            self.history.render(
                frame,
                middle[1],
                HistoryPanelProps {
                    entries: history.entries(),
                    selected: state.history_selected,
                    is_focused: state.focus == Focus::History,
                },
            );
        }

        self.help.render(frame, chunks[2], HelpBarProps);
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if let EventKind::Resize(_, _) = event {
            return EventOutcome::needs_render();
        }

        if let EventKind::Key(key) = event {
            // Global bindings run before focus routing.
            if key.code == KeyCode::Esc {
                return EventOutcome::action(Action::Quit);
            }
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                return EventOutcome::action(Action::Quit);
            }
            if key.code == KeyCode::Tab {
                return EventOutcome::action(Action::FocusNext);
            }
        }

        match state.focus {
            Focus::Search => EventOutcome::from_actions(self.search.handle_event(
                event,
                SearchBarProps {
                    value: &state.search_input,
                    is_focused: true,
                },
            )),
            Focus::History => {
                // 'q' quits here; while the input has focus it types.
                if let EventKind::Key(key) = event {
                    if key.code == KeyCode::Char('q') {
                        return EventOutcome::action(Action::Quit);
                    }
                }
                EventOutcome::from_actions(self.history.handle_event(
                    event,
                    HistoryPanelProps {
                        entries: state.weather.history().entries(),
                        selected: state.history_selected,
                        is_focused: true,
                    },
                ))
            }
        }
    }
}
