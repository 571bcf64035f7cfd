use alloy::primitives::U256;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

pub struct StatusBar {
    pub chain_id: Option<u64>,
    pub entry_fee: Option<U256>,
    pub symbol: String,
    pub error_message: Option<String>,
    /// Informational message, e.g. an explorer link for a confirmed write.
    pub info_message: Option<String>,
    pub loading: bool,
}

impl StatusBar {
    pub fn new(symbol: String) -> Self {
        Self {
            chain_id: None,
            entry_fee: None,
            symbol,
            error_message: None,
            info_message: None,
            loading: false,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.info_message = None;
        self.error_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.error_message = None;
        self.info_message = Some(message);
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.info_message = None;
    }

    fn fee_text(&self) -> String {
        match self.entry_fee {
            Some(fee) => format!(
                "{} {}",
                utils::format_u256_as_decimal(fee, 18),
                self.symbol
            ),
            None => "...".to_string(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(40)])
            .split(area);

        let hint = |key: &'static str, label: &'static str| {
            [
                Span::styled(key, Style::default().fg(THEME.text_accent)),
                Span::styled(label, Style::default().fg(THEME.text_muted)),
            ]
        };

        let left_content = if let Some(ref err) = self.error_message {
            Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default()
                        .fg(THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(err.as_str(), Style::default().fg(THEME.warning)),
            ])
        } else if let Some(ref info) = self.info_message {
            Line::from(Span::styled(format!(" {info}"), THEME.success_style()))
        } else if self.loading {
            Line::from(Span::styled(
                " Loading...",
                Style::default().fg(THEME.text_accent),
            ))
        } else {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(hint("1-4", ":Section  "));
            spans.extend(hint("a", ":Add  "));
            spans.extend(hint("w", ":Wallet  "));
            spans.extend(hint("r", ":Refresh  "));
            spans.extend(hint("?", ":Help  "));
            spans.extend(hint("q", ":Quit"));
            Line::from(spans)
        };

        let left = Paragraph::new(left_content).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        let (dot_color, status_text) = match self.chain_id {
            Some(id) => (THEME.success, format!("Chain {id}")),
            None => (THEME.error, "Disconnected".to_string()),
        };

        let right_content = Line::from(vec![
            Span::styled("\u{25cf} ", Style::default().fg(dot_color)),
            Span::styled(status_text, Style::default().fg(dot_color)),
            Span::styled(" | Fee ", THEME.muted_style()),
            Span::styled(format!("{} ", self.fee_text()), THEME.fee_style()),
        ]);

        let right = Paragraph::new(right_content)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_text_before_and_after_load() {
        let mut bar = StatusBar::new("ETH".to_string());
        assert_eq!(bar.fee_text(), "...");
        bar.entry_fee = Some(U256::from(1_000_000_000_000_000u64));
        assert!(bar.fee_text().ends_with(" ETH"));
        assert!(bar.fee_text().starts_with("0.001"));
    }

    #[test]
    fn test_error_replaces_info() {
        let mut bar = StatusBar::new("ETH".to_string());
        bar.set_info("done".to_string());
        bar.set_error("boom".to_string());
        assert!(bar.info_message.is_none());
        assert_eq!(bar.error_message.as_deref(), Some("boom"));
    }
}
