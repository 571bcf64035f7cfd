use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::components::form::{Field, Form, FormError};
use crate::components::section::{Section, SectionText};
use crate::data::types::{Achievement, RecordKind, WriteCall};
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

const TITLE: usize = 0;
const DESCRIPTION: usize = 1;
const CERTIFICATE_URL: usize = 2;

const TEXT: SectionText = SectionText {
    action: "Add Achievement",
    empty: "No achievements yet",
    success: "Achievement added successfully!",
};

pub struct AchievementsView {
    pub section: Section<Achievement>,
}

impl AchievementsView {
    pub fn new() -> Self {
        let form = Form::new(vec![
            Field::text("Achievement Title")
                .required()
                .placeholder("e.g., React Developer Certification"),
            Field::text("Description").placeholder("Brief description of your achievement..."),
            Field::text("Certificate URL").placeholder("https://..."),
        ]);
        Self {
            section: Section::new(RecordKind::Achievement, form),
        }
    }

    pub fn build_call(form: &Form) -> Result<WriteCall, FormError> {
        form.check_required()?;
        Ok(WriteCall::AddAchievement {
            title: form.value(TITLE).to_string(),
            description: form.value(DESCRIPTION).to_string(),
            certificate_url: form.value(CERTIFICATE_URL).to_string(),
        })
    }
}

fn achievement_item(achievement: &Achievement) -> ListItem<'static> {
    let mut lines = vec![Line::from(vec![
        Span::styled("\u{2605} ", Style::default().fg(THEME.warning)),
        Span::styled(achievement.title.clone(), THEME.title_style()),
    ])];

    if !achievement.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", achievement.description),
            Style::default().fg(THEME.text),
        )));
    }
    if !achievement.certificate_url.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Certificate: ", THEME.muted_style()),
            Span::styled(
                achievement.certificate_url.clone(),
                THEME.accent_style().add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    lines.push(Line::from(Span::styled(
        format!("  Earned {}", utils::format_time_ago(achievement.timestamp)),
        THEME.muted_style(),
    )));
    lines.push(Line::from(""));
    ListItem::new(lines)
}

impl Component for AchievementsView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if self.section.show_form {
            return self.section.handle_form_key(key, Self::build_call);
        }
        if self.section.handle_list_key(key) {
            return None;
        }
        if key.code == KeyCode::Char('a') {
            self.section.toggle_form();
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.section.render(frame, area, &TEXT, |achievement, _selected| {
            achievement_item(achievement)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_submit_with_required_fields_only() {
        let mut view = AchievementsView::new();
        view.section.entry_fee = Some(U256::from(1));
        view.handle_key(key(KeyCode::Char('a')));
        for c in "AWS SAA".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        match view.handle_key(key(KeyCode::Enter)) {
            Some(AppEvent::Submit(call)) => assert_eq!(
                call,
                WriteCall::AddAchievement {
                    title: "AWS SAA".to_string(),
                    description: String::new(),
                    certificate_url: String::new(),
                }
            ),
            other => panic!("expected a submit, got {other:?}"),
        }
    }

    #[test]
    fn test_build_call_argument_order() {
        let mut form = AchievementsView::new().section.form;
        form.set_value(TITLE, "Cert");
        form.set_value(DESCRIPTION, "Passed");
        form.set_value(CERTIFICATE_URL, "https://example.com/c/1");
        assert_eq!(
            AchievementsView::build_call(&form),
            Ok(WriteCall::AddAchievement {
                title: "Cert".to_string(),
                description: "Passed".to_string(),
                certificate_url: "https://example.com/c/1".to_string(),
            })
        );
    }

    #[test]
    fn test_no_fee_no_submit() {
        let mut view = AchievementsView::new();
        view.handle_key(key(KeyCode::Char('a')));
        view.handle_key(key(KeyCode::Char('x')));
        assert!(view.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(view.section.form.error, Some(FormError::FeeUnavailable));
    }
}
