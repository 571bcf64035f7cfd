use alloy::primitives::{Address, U256};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::components::form::{Field, Form, FormError};
use crate::components::section::{Section, SectionText};
use crate::data::types::{Course, RecordKind, WriteCall, is_owner};
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

const TITLE: usize = 0;
const PLATFORM: usize = 1;
const INSTRUCTOR: usize = 2;
const PROGRESS: usize = 3;

const PROGRESS_STEP: u8 = 5;

const TEXT: SectionText = SectionText {
    action: "Add Course",
    empty: "No courses added yet",
    success: "Course added successfully!",
};

/// A progress value being dialled in for one course before it is sent.
type ProgressEdit = Option<(U256, u8)>;

pub struct CoursesView {
    pub section: Section<Course>,
    progress_edit: ProgressEdit,
}

impl CoursesView {
    pub fn new() -> Self {
        let form = Form::new(vec![
            Field::text("Course Title").required(),
            Field::text("Platform").placeholder("e.g., Udemy, Coursera"),
            Field::text("Instructor"),
            Field::percent("Progress"),
        ]);
        Self {
            section: Section::new(RecordKind::Course, form),
            progress_edit: None,
        }
    }

    /// The `addCourse` call described by the form.
    pub fn build_call(form: &Form) -> Result<WriteCall, FormError> {
        form.check_required()?;
        Ok(WriteCall::AddCourse {
            title: form.value(TITLE).to_string(),
            platform: form.value(PLATFORM).to_string(),
            instructor: form.value(INSTRUCTOR).to_string(),
            progress: form.percent(PROGRESS)?,
        })
    }

    fn adjust_progress(&mut self, up: bool) {
        let account = self.section.account;
        let Some(course) = self.section.selected_record() else {
            return;
        };
        if !can_update_progress(account, course) {
            return;
        }
        let current = pending_progress(self.progress_edit, course);
        let next = if up {
            current.saturating_add(PROGRESS_STEP).min(100)
        } else {
            current.saturating_sub(PROGRESS_STEP)
        };
        let id = course.id;
        self.progress_edit = Some((id, next));
    }

    fn submit_progress(&mut self) -> Option<AppEvent> {
        let account = self.section.account;
        let course = self.section.selected_record()?;
        if !can_update_progress(account, course) {
            return None;
        }
        let selected_id = course.id;
        let (id, progress) = self.progress_edit.filter(|(id, _)| *id == selected_id)?;
        match self
            .section
            .start_write(WriteCall::UpdateCourseProgress { id, progress })
        {
            Ok(event) => {
                self.progress_edit = None;
                Some(event)
            }
            Err(e) => Some(AppEvent::Error(e.to_string())),
        }
    }
}

/// Progress can be changed by the course's owner until it is complete.
pub fn can_update_progress(account: Option<Address>, course: &Course) -> bool {
    is_owner(account, course.owner) && !course.completed
}

fn pending_progress(edit: ProgressEdit, course: &Course) -> u8 {
    match edit {
        Some((id, value)) if id == course.id => value,
        _ => course.progress,
    }
}

fn course_item(
    course: &Course,
    selected: bool,
    account: Option<Address>,
    edit: ProgressEdit,
) -> ListItem<'static> {
    let mut title = vec![Span::styled(course.title.clone(), THEME.title_style())];
    if course.completed {
        title.push(Span::styled("  \u{2713} Complete", THEME.success_style()));
    }
    let mut lines = vec![Line::from(title)];

    if !course.platform.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Platform:   ", THEME.muted_style()),
            Span::styled(course.platform.clone(), THEME.accent_style()),
        ]));
    }
    if !course.instructor.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Instructor: ", THEME.muted_style()),
            Span::styled(course.instructor.clone(), Style::default().fg(THEME.text)),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("  Progress    ", THEME.muted_style()),
        Span::styled(
            utils::progress_bar(course.progress, 20),
            THEME.progress_style(course.completed),
        ),
        Span::styled(format!(" {}%", course.progress), THEME.accent_style()),
    ]));

    if selected && can_update_progress(account, course) {
        lines.push(Line::from(vec![
            Span::styled("  [+/-] adjust  [u] update \u{2192} ", THEME.muted_style()),
            Span::styled(
                format!("{}%", pending_progress(edit, course)),
                THEME.accent_style(),
            ),
        ]));
    }

    lines.push(Line::from(Span::styled(
        format!("  Added {}", utils::format_time_ago(course.timestamp)),
        THEME.muted_style(),
    )));
    lines.push(Line::from(""));
    ListItem::new(lines)
}

impl Component for CoursesView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if self.section.show_form {
            return self.section.handle_form_key(key, Self::build_call);
        }

        if self.section.handle_list_key(key) {
            self.progress_edit = None;
            return None;
        }

        match key.code {
            KeyCode::Char('a') => {
                self.section.toggle_form();
                None
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.adjust_progress(true);
                None
            }
            KeyCode::Char('-') => {
                self.adjust_progress(false);
                None
            }
            KeyCode::Char('u') => self.submit_progress(),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let account = self.section.account;
        let edit = self.progress_edit;
        self.section.render(frame, area, &TEXT, |course, selected| {
            course_item(course, selected, account, edit)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn course(id: u64, owner: Address, progress: u8, completed: bool) -> Course {
        Course {
            id: U256::from(id),
            owner,
            title: format!("Course {id}"),
            platform: String::new(),
            instructor: String::new(),
            progress,
            completed,
            timestamp: 0,
        }
    }

    fn connected_view(account: Address) -> CoursesView {
        let mut view = CoursesView::new();
        view.section.account = Some(account);
        view.section.entry_fee = Some(U256::from(100));
        view
    }

    #[test]
    fn test_submit_with_required_fields_only() {
        let mut view = connected_view(Address::ZERO);
        view.handle_key(key(KeyCode::Char('a')));
        for c in "Intro to Rust".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }

        let event = view.handle_key(key(KeyCode::Enter));
        match event {
            Some(AppEvent::Submit(call)) => assert_eq!(
                call,
                WriteCall::AddCourse {
                    title: "Intro to Rust".to_string(),
                    platform: String::new(),
                    instructor: String::new(),
                    progress: 0,
                }
            ),
            other => panic!("expected a submit, got {other:?}"),
        }

        // A second Enter while the first write is pending issues nothing.
        assert!(view.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_missing_title_blocks_submit() {
        let mut view = connected_view(Address::ZERO);
        view.handle_key(key(KeyCode::Char('a')));
        assert!(view.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(
            view.section.form.error,
            Some(FormError::Missing("Course Title"))
        );
    }

    #[test]
    fn test_build_call_argument_order() {
        let mut form = CoursesView::new().section.form;
        form.set_value(TITLE, "Title");
        form.set_value(PLATFORM, "Coursera");
        form.set_value(INSTRUCTOR, "Ng");
        form.set_value(PROGRESS, "35");
        assert_eq!(
            CoursesView::build_call(&form),
            Ok(WriteCall::AddCourse {
                title: "Title".to_string(),
                platform: "Coursera".to_string(),
                instructor: "Ng".to_string(),
                progress: 35,
            })
        );
    }

    #[test]
    fn test_progress_control_only_for_owner() {
        let me = Address::from_slice(&[0x01; 20]);
        let other = Address::from_slice(&[0x02; 20]);
        assert!(can_update_progress(Some(me), &course(1, me, 10, false)));
        assert!(!can_update_progress(Some(me), &course(1, other, 10, false)));
        assert!(!can_update_progress(Some(me), &course(1, me, 100, true)));
        assert!(!can_update_progress(None, &course(1, me, 10, false)));
    }

    #[test]
    fn test_update_progress_flow() {
        let me = Address::from_slice(&[0x01; 20]);
        let mut view = connected_view(me);
        view.section.set_records(vec![course(1, me, 40, false)]);

        view.handle_key(key(KeyCode::Char('+')));
        view.handle_key(key(KeyCode::Char('+')));
        view.handle_key(key(KeyCode::Char('-')));
        match view.handle_key(key(KeyCode::Char('u'))) {
            Some(AppEvent::Submit(call)) => assert_eq!(
                call,
                WriteCall::UpdateCourseProgress {
                    id: U256::from(1),
                    progress: 45,
                }
            ),
            other => panic!("expected a submit, got {other:?}"),
        }
    }

    #[test]
    fn test_progress_keys_ignored_for_other_owner() {
        let me = Address::from_slice(&[0x01; 20]);
        let other = Address::from_slice(&[0x02; 20]);
        let mut view = connected_view(me);
        view.section.set_records(vec![course(1, other, 40, false)]);
        view.handle_key(key(KeyCode::Char('+')));
        assert!(view.handle_key(key(KeyCode::Char('u'))).is_none());
    }

    #[test]
    fn test_progress_controls_rendered_for_owner_only() {
        let me = Address::from_slice(&[0x01; 20]);
        let other = Address::from_slice(&[0x02; 20]);

        let mut view = connected_view(me);
        view.section.set_records(vec![course(1, me, 40, false)]);
        let text = crate::components::render_to_text(80, 30, |f| {
            let area = f.area();
            view.render(f, area)
        });
        assert!(text.contains("[+/-] adjust"));

        let mut view = connected_view(me);
        view.section.set_records(vec![course(1, other, 40, false)]);
        let text = crate::components::render_to_text(80, 30, |f| {
            let area = f.area();
            view.render(f, area)
        });
        assert!(text.contains("Course 1"));
        assert!(!text.contains("[+/-]"));
    }
}
