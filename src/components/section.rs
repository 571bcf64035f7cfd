use alloy::primitives::{Address, B256, U256};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::form::{Form, FormError, FormInput};
use crate::data::types::{RecordKind, WriteCall, WriteStatus, newest_first};
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

/// Fixed text for one section's chrome.
pub struct SectionText {
    /// Label of the add button and the idle submit button, e.g. "Add Course".
    pub action: &'static str,
    pub empty: &'static str,
    pub success: &'static str,
}

/// State shared by every record-list view: the fetched records, the creation
/// form, and the section's single in-flight write.
pub struct Section<T> {
    pub kind: RecordKind,
    /// `None` until the first read for the current account completes.
    pub records: Option<Vec<T>>,
    pub load_error: Option<String>,
    pub entry_fee: Option<U256>,
    pub account: Option<Address>,
    pub write: WriteStatus,
    pub form: Form,
    pub show_form: bool,
    selected: usize,
    list_state: ListState,
}

impl<T> Section<T> {
    pub fn new(kind: RecordKind, form: Form) -> Self {
        Self {
            kind,
            records: None,
            load_error: None,
            entry_fee: None,
            account: None,
            write: WriteStatus::Idle,
            form,
            show_form: false,
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    pub fn set_records(&mut self, records: Vec<T>) {
        self.selected = self.selected.min(records.len().saturating_sub(1));
        self.list_state.select(Some(self.selected));
        self.records = Some(records);
        self.load_error = None;
    }

    pub fn set_load_error(&mut self, message: String) {
        self.load_error = Some(message);
    }

    /// Forget everything tied to the previous account.
    pub fn clear(&mut self) {
        self.records = None;
        self.load_error = None;
        self.selected = 0;
        self.list_state.select(Some(0));
    }

    /// Records in the order they are drawn, newest first.
    pub fn displayed(&self) -> Vec<&T> {
        self.records
            .as_deref()
            .map(newest_first)
            .unwrap_or_default()
    }

    pub fn selected_record(&self) -> Option<&T> {
        self.displayed().get(self.selected).copied()
    }

    fn len(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }

    /// List navigation keys. Returns true if the key was used.
    pub fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        let len = self.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if len > 0 && self.selected + 1 < len {
                    self.select(self.selected + 1);
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if len > 0 {
                    self.select(self.selected.saturating_sub(1));
                }
                true
            }
            KeyCode::Char('g') => {
                if len > 0 {
                    self.select(0);
                }
                true
            }
            KeyCode::Char('G') => {
                if len > 0 {
                    self.select(len - 1);
                }
                true
            }
            _ => false,
        }
    }

    pub fn toggle_form(&mut self) {
        self.show_form = !self.show_form;
        self.form.error = None;
    }

    /// Hand a call to the app for submission. Refused while another write
    /// from this section is unconfirmed, and for paid calls before the fee is
    /// known.
    pub fn start_write(&mut self, call: WriteCall) -> Result<AppEvent, FormError> {
        if self.write.is_busy() {
            return Err(FormError::Busy);
        }
        if call.is_payable() && self.entry_fee.is_none() {
            return Err(FormError::FeeUnavailable);
        }
        self.write = WriteStatus::Pending;
        Ok(AppEvent::Submit(call))
    }

    pub fn set_write_status(&mut self, status: WriteStatus) {
        self.write = status;
    }

    /// Called once the display delay after the confirmation of `hash` has
    /// elapsed. Clears and hides the form if that write is still the latest
    /// one; a newer write keeps its form and status. Returns whether it reset.
    pub fn settle(&mut self, hash: B256) -> bool {
        if self.write != WriteStatus::Confirmed(hash) {
            return false;
        }
        self.form.reset();
        self.show_form = false;
        self.write = WriteStatus::Idle;
        true
    }

    /// Key handling while the creation form is open. `build` turns the form
    /// fields into the create call.
    pub fn handle_form_key(
        &mut self,
        key: KeyEvent,
        build: impl FnOnce(&Form) -> Result<WriteCall, FormError>,
    ) -> Option<AppEvent> {
        match self.form.handle_key(key) {
            FormInput::Submit => {
                let result = build(&self.form).and_then(|call| self.start_write(call));
                match result {
                    Ok(event) => {
                        self.form.error = None;
                        Some(event)
                    }
                    Err(e) => {
                        self.form.error = Some(e);
                        None
                    }
                }
            }
            FormInput::Cancel => {
                self.toggle_form();
                None
            }
            FormInput::Edited | FormInput::Ignored => None,
        }
    }

    pub fn submit_label(&self, action: &str) -> String {
        match self.write {
            WriteStatus::Pending => "Sending...".to_string(),
            WriteStatus::Confirming(_) => "Confirming...".to_string(),
            _ => action.to_string(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        text: &SectionText,
        item: impl Fn(&T, bool) -> ListItem<'static>,
    ) {
        let button = if self.show_form {
            "[a] Cancel ".to_string()
        } else {
            format!("[a] + {} ", text.action)
        };
        let outer_block = Block::default()
            .title(format!(" {} ({}) ", self.kind.heading(), self.len()))
            .title(Line::from(button).right_aligned())
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let list_area = if self.show_form {
            let form_height = self.form.fields().len() as u16 + 6;
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(form_height), Constraint::Min(0)])
                .split(inner);
            self.render_form(frame, chunks[0], text);
            chunks[1]
        } else {
            inner
        };

        self.render_list(frame, list_area, text, item);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, text: &SectionText) {
        let block = Block::default()
            .title(format!(" New {} ", self.kind))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(THEME.warning));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = self.form.lines();
        lines.push(Line::from(""));

        let fee = match self.entry_fee {
            Some(fee) => Span::styled(utils::format_eth(fee), THEME.fee_style()),
            None => Span::styled("...", THEME.fee_style()),
        };
        let submit_style = if self.write.is_busy() {
            THEME.muted_style()
        } else {
            THEME.accent_style().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled("  Fee: ", THEME.muted_style()),
            fee,
            Span::styled("    [Enter] ", THEME.muted_style()),
            Span::styled(self.submit_label(text.action), submit_style),
            Span::styled("  [Tab] Next field  [Esc] Cancel", THEME.muted_style()),
        ]));

        let status = if let Some(ref err) = self.form.error {
            Some(Span::styled(format!("  {err}"), THEME.error_style()))
        } else {
            match &self.write {
                WriteStatus::Confirmed(_) => {
                    Some(Span::styled(format!("  {}", text.success), THEME.success_style()))
                }
                WriteStatus::Failed(msg) => {
                    Some(Span::styled(format!("  {msg}"), THEME.error_style()))
                }
                _ => None,
            }
        };
        if let Some(span) = status {
            lines.push(Line::from(span));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_list(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        text: &SectionText,
        item: impl Fn(&T, bool) -> ListItem<'static>,
    ) {
        let Some(records) = self.records.as_deref() else {
            let (msg, style) = match self.load_error {
                Some(ref err) => (format!("Could not load records: {err}"), THEME.error_style()),
                None => ("Loading...".to_string(), THEME.muted_style()),
            };
            let paragraph = Paragraph::new(msg)
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        };

        if records.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(text.empty, Style::default().fg(THEME.text_muted))),
                Line::from(Span::styled(
                    format!("Press 'a' to {} and get started", text.action.to_lowercase()),
                    THEME.muted_style(),
                )),
            ];
            let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = newest_first(records)
            .into_iter()
            .enumerate()
            .map(|(i, record)| item(record, i == self.selected))
            .collect();

        let list = List::new(items)
            .highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::form::Field;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn section() -> Section<&'static str> {
        Section::new(
            RecordKind::Note,
            Form::new(vec![Field::text("Title").required()]),
        )
    }

    fn note_call() -> WriteCall {
        WriteCall::AddNote {
            title: "t".to_string(),
            content: "c".to_string(),
            tags: String::new(),
        }
    }

    #[test]
    fn test_displayed_newest_first() {
        let mut s = section();
        s.set_records(vec!["A", "B", "C"]);
        assert_eq!(s.displayed(), vec![&"C", &"B", &"A"]);
        assert_eq!(s.selected_record(), Some(&"C"));
    }

    #[test]
    fn test_not_loaded_is_distinct_from_empty() {
        let mut s = section();
        assert!(s.records.is_none());
        s.set_records(Vec::new());
        assert_eq!(s.records.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut s = section();
        s.set_records(vec!["A", "B", "C"]);
        s.handle_list_key(key(KeyCode::Char('j')));
        s.handle_list_key(key(KeyCode::Char('j')));
        s.handle_list_key(key(KeyCode::Char('j')));
        assert_eq!(s.selected_record(), Some(&"A"));
        s.set_records(vec!["A"]);
        assert_eq!(s.selected_record(), Some(&"A"));
    }

    #[test]
    fn test_start_write_requires_fee_for_paid_calls() {
        let mut s = section();
        assert_eq!(s.start_write(note_call()).unwrap_err(), FormError::FeeUnavailable);
        assert_eq!(s.write, WriteStatus::Idle);

        let free = WriteCall::MarkGoalAchieved { id: U256::from(1) };
        assert!(s.start_write(free).is_ok());
    }

    #[test]
    fn test_start_write_refused_while_busy() {
        let mut s = section();
        s.entry_fee = Some(U256::from(1));
        assert!(matches!(s.start_write(note_call()), Ok(AppEvent::Submit(_))));
        assert_eq!(s.write, WriteStatus::Pending);
        assert_eq!(s.start_write(note_call()).unwrap_err(), FormError::Busy);

        s.set_write_status(WriteStatus::Confirming(B256::ZERO));
        assert_eq!(s.start_write(note_call()).unwrap_err(), FormError::Busy);
    }

    #[test]
    fn test_failed_write_reenables_submission() {
        let mut s = section();
        s.entry_fee = Some(U256::from(1));
        s.show_form = true;
        s.start_write(note_call()).unwrap();
        s.set_write_status(WriteStatus::Failed("user rejected".to_string()));
        assert!(s.show_form);
        assert!(!s.settle(B256::ZERO));
        assert!(s.start_write(note_call()).is_ok());
    }

    #[test]
    fn test_settle_once_after_confirmation() {
        let mut s = section();
        s.entry_fee = Some(U256::from(1));
        s.show_form = true;
        s.form.set_value(0, "typed");
        s.start_write(note_call()).unwrap();
        s.set_write_status(WriteStatus::Confirming(B256::ZERO));
        assert!(!s.settle(B256::ZERO));

        s.set_write_status(WriteStatus::Confirmed(B256::ZERO));
        assert!(s.settle(B256::ZERO));
        assert!(!s.show_form);
        assert!(s.form.is_pristine());
        assert_eq!(s.write, WriteStatus::Idle);
        assert!(!s.settle(B256::ZERO));
    }

    #[test]
    fn test_settle_leaves_newer_write_alone() {
        let first = B256::repeat_byte(1);
        let mut s = section();
        s.entry_fee = Some(U256::from(1));
        s.show_form = true;
        s.start_write(note_call()).unwrap();
        s.set_write_status(WriteStatus::Confirmed(first));

        // A second write starts during the display delay of the first.
        s.form.set_value(0, "second");
        s.start_write(note_call()).unwrap();
        assert!(!s.settle(first));
        assert_eq!(s.write, WriteStatus::Pending);
        assert!(s.show_form);
        assert!(!s.form.is_pristine());

        let second = B256::repeat_byte(2);
        s.set_write_status(WriteStatus::Confirmed(second));
        assert!(!s.settle(first));
        assert!(s.settle(second));
        assert_eq!(s.write, WriteStatus::Idle);
    }

    #[test]
    fn test_submit_label_follows_status() {
        let mut s = section();
        assert_eq!(s.submit_label("Add Note"), "Add Note");
        s.set_write_status(WriteStatus::Pending);
        assert_eq!(s.submit_label("Add Note"), "Sending...");
        s.set_write_status(WriteStatus::Confirming(B256::ZERO));
        assert_eq!(s.submit_label("Add Note"), "Confirming...");
    }

    #[test]
    fn test_form_error_shown_instead_of_submit() {
        let mut s = section();
        s.show_form = true;
        let event = s.handle_form_key(key(KeyCode::Enter), |form| {
            form.check_required()?;
            Ok(note_call())
        });
        assert!(event.is_none());
        assert_eq!(s.form.error, Some(FormError::Missing("Title")));
    }

    #[test]
    fn test_esc_hides_form() {
        let mut s = section();
        s.show_form = true;
        s.handle_form_key(key(KeyCode::Esc), |_| Ok(note_call()));
        assert!(!s.show_form);
    }
}
