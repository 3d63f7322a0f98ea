//! Recent-search list.
//!
//! j/k/arrows move the selection, Enter re-fetches the selected city.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::event::EventKind;

pub struct HistoryPanelProps<'a> {
    /// History entries, most-recent-first.
    pub entries: &'a [String],
    pub selected: usize,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct HistoryPanel {
    scroll_offset: usize,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected.saturating_sub(viewport_height - 1);
        }
    }
}

impl Component<Action> for HistoryPanel {
    type Props<'a> = HistoryPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.entries.is_empty() {
            return None;
        }
        let len = props.entries.len();

        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let new_idx = (props.selected + 1).min(len.saturating_sub(1));
                (new_idx != props.selected).then_some(Action::HistorySelect(new_idx))
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let new_idx = props.selected.saturating_sub(1);
                (new_idx != props.selected).then_some(Action::HistorySelect(new_idx))
            }
            KeyCode::Char('g') | KeyCode::Home => {
                (props.selected != 0).then_some(Action::HistorySelect(0))
            }
            KeyCode::Char('G') | KeyCode::End => {
                let last = len.saturating_sub(1);
                (props.selected != last).then_some(Action::HistorySelect(last))
            }
            KeyCode::Enter => Some(Action::HistoryFetch(props.selected)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let viewport_height = area.height.saturating_sub(2) as usize;
        self.ensure_visible(props.selected, viewport_height);

        let items: Vec<ListItem> = props
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == props.selected && props.is_focused {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::raw(entry.as_str())).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recent Searches ")
                .border_style(if props.is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );

        let mut state = ListState::default().with_selected(Some(props.selected));
        *state.offset_mut() = self.scroll_offset;
        frame.render_stateful_widget(list, area, &mut state);
    }
}
