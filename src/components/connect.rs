use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

/// Outcome of a key press in the connect dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectAction {
    Connect(String),
    Cancel,
}

/// Modal prompt for the private key of the account to sign with.
pub struct ConnectDialog {
    pub active: bool,
    input: String,
    cursor_position: usize,
    /// Set when the last key could not be used; shown in the title.
    pub error: Option<String>,
    /// A wallet connection attempt is in flight.
    pub connecting: bool,
}

impl ConnectDialog {
    pub fn new() -> Self {
        Self {
            active: false,
            input: String::new(),
            cursor_position: 0,
            error: None,
            connecting: false,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.input.clear();
        self.cursor_position = 0;
        self.error = None;
        self.connecting = false;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.input.clear();
        self.cursor_position = 0;
        self.error = None;
        self.connecting = false;
    }

    /// Reopen with the reason the previous key was rejected.
    pub fn fail(&mut self, message: String) {
        self.active = true;
        self.connecting = false;
        self.error = Some(message);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ConnectAction> {
        if !self.active {
            return None;
        }
        // Only Esc is live while a connection is in flight.
        if self.connecting && key.code != KeyCode::Esc {
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                let secret = self.input.trim().to_string();
                if secret.is_empty() {
                    self.error = Some("Enter a private key".to_string());
                    return None;
                }
                self.connecting = true;
                self.error = None;
                Some(ConnectAction::Connect(secret))
            }
            KeyCode::Esc => {
                self.deactivate();
                Some(ConnectAction::Cancel)
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    self.cursor_position -= 1;
                    self.input.remove(self.cursor_position);
                }
                self.error = None;
                None
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor_position < self.input.len() {
                    self.cursor_position += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.input.len();
                None
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                    self.input.clear();
                    self.cursor_position = 0;
                } else if c.is_ascii_hexdigit() || c == 'x' {
                    self.input.insert(self.cursor_position, c);
                    self.cursor_position += 1;
                }
                self.error = None;
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let width = area.width.min(74);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let popup_area = Rect::new(x, area.y + 2, width, 3);

        frame.render_widget(Clear, popup_area);

        let border_style = if self.error.is_some() {
            Style::default().fg(THEME.error)
        } else {
            THEME.border_focused_style()
        };

        let title = match (&self.error, self.connecting) {
            (Some(err), _) => format!(" Connect Wallet - {err} "),
            (None, true) => " Connect Wallet - connecting... ".to_string(),
            (None, false) => " Connect Wallet (private key, Enter to connect) ".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .style(Style::default().bg(THEME.surface));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        // Never echo the key itself.
        let display_text = if self.input.is_empty() {
            Span::styled("0x...", THEME.muted_style())
        } else {
            Span::styled(
                "\u{2022}".repeat(self.input.len()),
                Style::default().fg(THEME.text),
            )
        };
        frame.render_widget(Paragraph::new(display_text), inner);

        let cursor_x = inner.x + self.cursor_position as u16;
        if cursor_x < inner.right() && !self.connecting {
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}
