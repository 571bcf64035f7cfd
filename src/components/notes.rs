use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::components::form::{Field, Form, FormError};
use crate::components::section::{Section, SectionText};
use crate::data::types::{Note, RecordKind, WriteCall};
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

const TITLE: usize = 0;
const CONTENT: usize = 1;
const TAGS: usize = 2;

const TEXT: SectionText = SectionText {
    action: "Add Note",
    empty: "No study notes yet",
    success: "Note added successfully!",
};

pub struct NotesView {
    pub section: Section<Note>,
}

impl NotesView {
    pub fn new() -> Self {
        let form = Form::new(vec![
            Field::text("Note Title").required().placeholder("e.g., React Hooks Summary"),
            Field::text("Content").required().placeholder("Write your study notes here..."),
            Field::text("Tags").placeholder("e.g., react, javascript, hooks"),
        ]);
        Self {
            section: Section::new(RecordKind::Note, form),
        }
    }

    pub fn build_call(form: &Form) -> Result<WriteCall, FormError> {
        form.check_required()?;
        Ok(WriteCall::AddNote {
            title: form.value(TITLE).to_string(),
            content: form.value(CONTENT).to_string(),
            tags: form.value(TAGS).to_string(),
        })
    }
}

fn note_item(note: &Note) -> ListItem<'static> {
    let mut lines = vec![Line::from(Span::styled(note.title.clone(), THEME.title_style()))];

    for content_line in note.content.lines() {
        lines.push(Line::from(Span::styled(
            format!("  {content_line}"),
            Style::default().fg(THEME.text),
        )));
    }

    let tags = note.tag_list();
    if !tags.is_empty() {
        let mut spans = vec![Span::raw("  ")];
        for tag in tags {
            spans.push(Span::styled(format!("#{tag}"), THEME.tag_style()));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!("  {}", utils::format_time_ago(note.timestamp)),
        THEME.muted_style(),
    )));
    lines.push(Line::from(""));
    ListItem::new(lines)
}

impl Component for NotesView {
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
        self.section
            .render(frame, area, &TEXT, |note, _selected| note_item(note));
    }
}
