//! Test utilities: key-event construction and a render harness.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::{Frame, Terminal};

/// Create a `KeyEvent` from a key string, e.g. `key("a")`, `key("enter")`,
/// `key("ctrl+u")`.
///
/// # Panics
///
/// Panics if the key string cannot be parsed, which is what a test wants.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {s:?}"))
}

fn parse_key_string(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let mut code = None;

    for part in s.split('+') {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            lower => code = Some(parse_code(lower, part)?),
        }
    }

    code.map(|code| KeyEvent::new(code, modifiers))
}

fn parse_code(lower: &str, raw: &str) -> Option<KeyCode> {
    let code = match lower {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = raw.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };
    Some(code)
}

/// Renders into an off-screen buffer and exposes it as plain text.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend terminal");
        Self { terminal }
    }

    /// Run a render closure and return the buffer contents, one line per
    /// terminal row, styling stripped.
    pub fn render_to_string_plain(&mut self, render: impl FnOnce(&mut Frame)) -> String {
        self.terminal.draw(|frame| render(frame)).expect("draw");

        let buffer = self.terminal.backend().buffer();
        let area = *buffer.area();
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                match buffer.cell((x, y)) {
                    Some(cell) => out.push_str(cell.symbol()),
                    None => out.push(' '),
                }
            }
            out.push('\n');
        }
        out
    }
}
