//! Pure UI components.
//!
//! Components receive read-only props, map events to actions and never touch
//! state directly. Internal widget state (cursor position, scroll offset) may
//! live in `&mut self`; data changes must go through actions.

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

pub mod help_bar;
pub mod history_panel;
pub mod search_bar;
pub mod weather_panel;

pub use help_bar::{HelpBar, HelpBarProps};
pub use history_panel::{HistoryPanel, HistoryPanelProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};

/// A pure UI element: props in, actions and pixels out.
pub trait Component<A> {
    /// Read-only data required to render the component.
    type Props<'a>;

    /// Handle an event and return actions to dispatch. The default is a
    /// render-only component.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
