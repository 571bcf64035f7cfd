use alloy::primitives::Address;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

pub struct Header {
    pub chain_name: String,
    pub current_tab: Option<usize>,
    pub account: Option<Address>,
}

const TABS: &[&str] = &["Courses [1]", "Notes [2]", "Achievements [3]", "Goals [4]"];

impl Header {
    pub fn new(chain_name: String) -> Self {
        Self {
            chain_name,
            current_tab: None,
            account: None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        // title | tabs | network and account
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Min(0),
                Constraint::Length(34),
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            " Study DApp",
            Style::default()
                .fg(THEME.text_accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        // Tabs only mean something once there is an account to show records for.
        if self.account.is_some() {
            let tab_titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
            let tabs = Tabs::new(tab_titles)
                .select(self.current_tab.unwrap_or(0))
                .style(THEME.muted_style())
                .highlight_style(THEME.accent_style().add_modifier(Modifier::BOLD))
                .divider(Span::raw(" | "));
            frame.render_widget(tabs, chunks[1]);
        } else {
            let tagline = Paragraph::new(Span::styled(
                "Track Your Learning Journey, On-Chain Forever",
                THEME.muted_style(),
            ))
            .style(THEME.header_style());
            frame.render_widget(tagline, chunks[1]);
        }

        let account = match self.account {
            Some(ref addr) => Span::styled(utils::truncate_address(addr), THEME.address_style()),
            None => Span::styled("Not connected", THEME.muted_style()),
        };
        let network_info = Line::from(vec![
            Span::styled(self.chain_name.as_str(), Style::default().fg(THEME.text)),
            Span::styled(" | ", THEME.muted_style()),
            account,
            Span::raw(" "),
        ]);
        let network_paragraph = Paragraph::new(network_info)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(network_paragraph, chunks[2]);
    }
}
