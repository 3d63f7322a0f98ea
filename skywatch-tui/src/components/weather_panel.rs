//! Current-conditions panel.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::AppState;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct WeatherPanelProps<'a> {
    pub state: &'a AppState,
}

/// Renders one of four views: the error message, the last snapshot, the
/// loading spinner, or the initial prompt. A stale snapshot is intentionally
/// replaced by the error view while `error` is set; the data itself stays in
/// state untouched.
#[derive(Default)]
pub struct WeatherPanel;

enum WeatherView<'a> {
    Error(&'a str),
    Ready(&'a skywatch_core::WeatherSnapshot),
    Loading,
    Empty,
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        if let Some(error) = state.weather.error() {
            WeatherView::Error(error)
        } else if let Some(snapshot) = state.weather.data() {
            WeatherView::Ready(snapshot)
        } else if state.weather.loading() {
            WeatherView::Loading
        } else {
            WeatherView::Empty
        }
    }
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        // Refetches keep the stale snapshot on screen; the spinner moves into
        // the title so loading stays visible either way.
        let title = if state.weather.loading() {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            format!(" ☁ Weather {spinner} ")
        } else {
            " ☁ Weather ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).bold());
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let lines = lines_for_state(state);
        if lines.is_empty() {
            return;
        }

        let constraints: Vec<Constraint> =
            lines.iter().map(|_| Constraint::Length(1)).collect();
        let chunks = Layout::vertical(constraints).flex(Flex::Center).split(inner);

        for (line, chunk) in lines.into_iter().zip(chunks.iter().copied()) {
            frame.render_widget(Paragraph::new(line), chunk);
        }
    }
}

fn lines_for_state(state: &AppState) -> Vec<Line<'static>> {
    match WeatherView::from_state(state) {
        WeatherView::Error(error) => vec![
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
            Line::from("").centered(),
            Line::from(vec![
                Span::styled("Search again to ", Style::default().fg(Color::DarkGray)),
                Span::styled("retry", Style::default().fg(Color::Cyan).bold()),
            ])
            .centered(),
        ],
        WeatherView::Ready(snapshot) => {
            let temp = format!("{:.1}°C", snapshot.temperature_celsius);
            let temp_color = temp_to_color(snapshot.temperature_celsius);

            vec![
                Line::from(vec![Span::styled(
                    snapshot.city_name.clone(),
                    Style::default().fg(Color::Cyan).bold(),
                )])
                .centered(),
                Line::from("").centered(),
                Line::from(vec![Span::styled(
                    format!(
                        "{} {}",
                        condition_glyph(&snapshot.condition_code),
                        snapshot.condition_description
                    ),
                    Style::default().fg(Color::Gray),
                )])
                .centered(),
                Line::from(vec![Span::styled(
                    temp,
                    Style::default().fg(temp_color).bold(),
                )])
                .centered(),
                Line::from("").centered(),
                Line::from(vec![
                    Span::styled("Humidity ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{}%", snapshot.humidity_percent),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled("   Wind ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:.1} m/s", snapshot.wind_speed_mps),
                        Style::default().fg(Color::Gray),
                    ),
                ])
                .centered(),
            ]
        }
        WeatherView::Loading => {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            let dots = ".".repeat((state.tick_count as usize / 3) % 4);

            vec![Line::from(vec![
                Span::styled(spinner, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!(" Fetching weather{dots:<3}"),
                    Style::default().fg(Color::Gray),
                ),
            ])
            .centered()]
        }
        WeatherView::Empty => vec![Line::from(vec![
            Span::styled("Type a city and press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" to fetch weather", Style::default().fg(Color::DarkGray)),
        ])
        .centered()],
    }
}

/// Map the provider's icon code family to a glyph.
fn condition_glyph(code: &str) -> &'static str {
    match code.get(..2) {
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "🌧",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "·",
    }
}

/// Temperature-based color scale.
fn temp_to_color(celsius: f64) -> Color {
    match celsius as i32 {
        ..=-10 => Color::Rgb(150, 200, 255),
        -9..=0 => Color::Rgb(100, 180, 255),
        1..=10 => Color::Rgb(100, 220, 200),
        11..=20 => Color::Rgb(150, 230, 150),
        21..=30 => Color::Rgb(255, 220, 100),
        31..=40 => Color::Rgb(255, 150, 80),
        _ => Color::Rgb(255, 100, 100),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_families() {
        assert_eq!(condition_glyph("01d"), "☀");
        assert_eq!(condition_glyph("01n"), "☀");
        assert_eq!(condition_glyph("10d"), "🌧");
        assert_eq!(condition_glyph("50n"), "🌫");
        assert_eq!(condition_glyph(""), "·");
        assert_eq!(condition_glyph("99x"), "·");
    }
}
