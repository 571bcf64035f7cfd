use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("1-4", "Courses / Notes / Achievements / Goals"),
            ("Tab", "Next section"),
            ("\u{2191}/k \u{2193}/j", "Move selection"),
            ("g / G", "First / last record"),
        ],
    ),
    (
        "Records",
        &[
            ("a", "Open or close the add form"),
            ("Enter", "Submit the form (pays the entry fee)"),
            ("Tab", "Next field while the form is open"),
            ("\u{2190}/\u{2192}", "Adjust a progress field"),
            ("Esc", "Close the form"),
        ],
    ),
    (
        "Your Records",
        &[
            ("+ / -", "Adjust selected course progress"),
            ("u", "Send the progress update"),
            ("x", "Mark selected goal achieved"),
        ],
    ),
    (
        "Other",
        &[
            ("w", "Connect or switch wallet"),
            ("r", "Re-read everything from the contract"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ],
    ),
];

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Any key closes the overlay. Returns true if it consumed the key.
    pub fn dismiss(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_width = area.width * 60 / 100;
        let popup_height = area.height * 70 / 100;
        let x = area.x + (area.width - popup_width) / 2;
        let y = area.y + (area.height - popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let mut help_text = Vec::new();
        for (i, (heading, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(
                *heading,
                Style::default()
                    .fg(THEME.text_accent)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, action) in keys.iter() {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {key:<10} "), Style::default().fg(THEME.text_accent)),
                    Span::styled(*action, Style::default().fg(THEME.text)),
                ]));
            }
        }

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_only_consumes_when_visible() {
        let mut help = HelpOverlay::new();
        assert!(!help.dismiss());
        help.toggle();
        assert!(help.dismiss());
        assert!(!help.visible);
    }
}
