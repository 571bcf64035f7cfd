use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

const FEATURES: [(&str, &str); 4] = [
    ("Courses", "Track progress and completion"),
    ("Notes", "Store study notes with tags"),
    ("Achievements", "Certificates and milestones"),
    ("Goals", "Set and track learning goals"),
];

/// Shown in place of the record lists while no account is connected.
pub struct Landing;

impl Landing {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(THEME.border_style());
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let intro = vec![
            Line::from(Span::styled(
                "Track Your Learning Journey",
                THEME.title_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Store your courses, notes, achievements, and learning goals on the blockchain.",
                THEME.muted_style(),
            )),
            Line::from(Span::styled(
                "Permanent, verifiable, and owned by you.",
                THEME.muted_style(),
            )),
        ];
        frame.render_widget(
            Paragraph::new(intro)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[1],
        );

        let width = inner.width.min(100);
        let cards_area = Rect::new(
            inner.x + (inner.width - width) / 2,
            chunks[2].y,
            width,
            chunks[2].height,
        );
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(cards_area);
        for ((title, blurb), card) in FEATURES.iter().zip(cards.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(THEME.border_style())
                .style(Style::default().bg(THEME.surface_bright));
            let text = vec![
                Line::from(Span::styled(*title, THEME.title_style())),
                Line::from(""),
                Line::from(Span::styled(*blurb, THEME.muted_style())),
            ];
            frame.render_widget(
                Paragraph::new(text)
                    .block(block)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                *card,
            );
        }

        let hint = Line::from(vec![
            Span::styled("Press ", THEME.muted_style()),
            Span::styled("w", THEME.accent_style().add_modifier(Modifier::BOLD)),
            Span::styled(" to connect a wallet", THEME.muted_style()),
        ]);
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), hint]).alignment(Alignment::Center),
            chunks[3],
        );
    }
}
