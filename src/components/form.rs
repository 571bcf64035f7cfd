use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use thiserror::Error;

use crate::theme::THEME;
use crate::utils;

/// Why a form could not be turned into a contract call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a date like 2025-06-30")]
    InvalidDate(&'static str),
    #[error("{0} must be between 0 and 100")]
    InvalidPercent(&'static str),
    #[error("Entry fee not loaded yet")]
    FeeUnavailable,
    #[error("Wait for the pending transaction to confirm")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// 0-100, adjustable with Left/Right.
    Percent,
    /// YYYY-MM-DD
    Date,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
    initial: &'static str,
    pub value: String,
}

impl Field {
    pub fn text(label: &'static str) -> Self {
        Self::with_kind(label, FieldKind::Text, "")
    }

    pub fn percent(label: &'static str) -> Self {
        Self::with_kind(label, FieldKind::Percent, "0")
    }

    pub fn date(label: &'static str) -> Self {
        Self::with_kind(label, FieldKind::Date, "").placeholder("YYYY-MM-DD")
    }

    fn with_kind(label: &'static str, kind: FieldKind, initial: &'static str) -> Self {
        Self {
            label,
            kind,
            required: false,
            placeholder: "",
            initial,
            value: initial.to_string(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// What a key press did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Submit,
    Cancel,
    Edited,
    Ignored,
}

pub struct Form {
    fields: Vec<Field>,
    focused: usize,
    pub error: Option<FormError>,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            focused: 0,
            error: None,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[cfg(test)]
    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.to_string();
        }
    }

    /// Restore every field to its initial value.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.initial.to_string();
        }
        self.focused = 0;
        self.error = None;
    }

    #[cfg(test)]
    pub fn is_pristine(&self) -> bool {
        self.fields.iter().all(|f| f.value == f.initial)
    }

    /// The first required field left blank, if any.
    pub fn check_required(&self) -> Result<(), FormError> {
        match self
            .fields
            .iter()
            .find(|f| f.required && f.value.trim().is_empty())
        {
            Some(field) => Err(FormError::Missing(field.label)),
            None => Ok(()),
        }
    }

    pub fn percent(&self, index: usize) -> Result<u8, FormError> {
        let label = self.fields.get(index).map(|f| f.label).unwrap_or("Progress");
        match self.value(index).trim().parse::<u8>() {
            Ok(value) if value <= 100 => Ok(value),
            _ => Err(FormError::InvalidPercent(label)),
        }
    }

    pub fn date(&self, index: usize) -> Result<u64, FormError> {
        let label = self.fields.get(index).map(|f| f.label).unwrap_or("Date");
        utils::parse_date(self.value(index)).ok_or(FormError::InvalidDate(label))
    }

    fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = if self.focused == 0 {
                self.fields.len() - 1
            } else {
                self.focused - 1
            };
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormInput {
        match key.code {
            KeyCode::Enter => FormInput::Submit,
            KeyCode::Esc => FormInput::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormInput::Edited
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                FormInput::Edited
            }
            _ => {
                let Some(field) = self.fields.get_mut(self.focused) else {
                    return FormInput::Ignored;
                };
                let edited = edit_field(field, key);
                if edited {
                    self.error = None;
                    FormInput::Edited
                } else {
                    FormInput::Ignored
                }
            }
        }
    }

    /// One line per field, with a cursor on the focused one.
    pub fn lines(&self) -> Vec<Line<'static>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = i == self.focused;
                let marker = if field.required { " *" } else { "" };
                let label = format!("  {}{marker}: ", field.label);
                let cursor = if focused { "_" } else { "" };

                let value_span = if field.value.is_empty() && !focused {
                    Span::styled(field.placeholder.to_string(), THEME.muted_style())
                } else {
                    let shown = match field.kind {
                        FieldKind::Percent => format!("{}%{cursor}", field.value),
                        _ => format!("{}{cursor}", field.value),
                    };
                    let style = if focused {
                        Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(THEME.text)
                    };
                    Span::styled(shown, style)
                };

                let mut spans = vec![Span::styled(label, THEME.muted_style()), value_span];
                if field.kind == FieldKind::Percent {
                    let progress = field.value.parse::<u8>().unwrap_or(0);
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        utils::progress_bar(progress, 20),
                        THEME.progress_style(false),
                    ));
                }
                Line::from(spans)
            })
            .collect()
    }
}

fn edit_field(field: &mut Field, key: KeyEvent) -> bool {
    match (field.kind, key.code) {
        (_, KeyCode::Char('u')) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.value.clear();
            true
        }
        (_, KeyCode::Backspace) => field.value.pop().is_some(),
        (FieldKind::Percent, KeyCode::Left) => {
            let current = field.value.parse::<u8>().unwrap_or(0).min(100);
            field.value = current.saturating_sub(5).to_string();
            true
        }
        (FieldKind::Percent, KeyCode::Right) => {
            let current = field.value.parse::<u8>().unwrap_or(0).min(100);
            field.value = (current + 5).min(100).to_string();
            true
        }
        (FieldKind::Percent, KeyCode::Char(c)) if c.is_ascii_digit() => {
            if field.value == "0" {
                field.value.clear();
            }
            if field.value.len() < 3 {
                field.value.push(c);
            }
            true
        }
        (FieldKind::Date, KeyCode::Char(c)) if c.is_ascii_digit() || c == '-' => {
            if field.value.len() < 10 {
                field.value.push(c);
            }
            true
        }
        (FieldKind::Text, KeyCode::Char(c)) => {
            field.value.push(c);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut Form, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn sample() -> Form {
        Form::new(vec![
            Field::text("Title").required(),
            Field::text("Notes"),
            Field::percent("Progress"),
            Field::date("Target Date").required(),
        ])
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = sample();
        type_str(&mut form, "Rust");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "ch. 4");
        assert_eq!(form.value(0), "Rust");
        assert_eq!(form.value(1), "ch. 4");
    }

    #[test]
    fn test_tab_wraps_and_backtab() {
        let mut form = sample();
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused(), 3);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focused(), 0);
    }

    #[test]
    fn test_check_required_reports_first_missing() {
        let mut form = sample();
        assert_eq!(form.check_required(), Err(FormError::Missing("Title")));
        form.set_value(0, "Title");
        assert_eq!(form.check_required(), Err(FormError::Missing("Target Date")));
        form.set_value(3, "2030-01-01");
        assert_eq!(form.check_required(), Ok(()));
    }

    #[test]
    fn test_whitespace_does_not_satisfy_required() {
        let mut form = sample();
        form.set_value(0, "   ");
        assert_eq!(form.check_required(), Err(FormError::Missing("Title")));
    }

    #[test]
    fn test_percent_field_arrows_and_digits() {
        let mut form = sample();
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Right));
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.percent(2), Ok(10));
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.percent(2), Ok(5));

        form.set_value(2, "0");
        type_str(&mut form, "x75");
        assert_eq!(form.value(2), "75");
    }

    #[test]
    fn test_percent_out_of_range() {
        let mut form = sample();
        form.set_value(2, "150");
        assert_eq!(form.percent(2), Err(FormError::InvalidPercent("Progress")));
    }

    #[test]
    fn test_date_field() {
        let mut form = sample();
        form.set_value(3, "2025-01-01");
        assert_eq!(form.date(3), Ok(1_735_689_600));
        form.set_value(3, "tomorrow");
        assert_eq!(form.date(3), Err(FormError::InvalidDate("Target Date")));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut form = sample();
        type_str(&mut form, "Something");
        form.set_value(2, "80");
        form.handle_key(key(KeyCode::Tab));
        form.error = Some(FormError::FeeUnavailable);
        form.reset();
        assert!(form.is_pristine());
        assert_eq!(form.value(2), "0");
        assert_eq!(form.focused(), 0);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_enter_and_esc() {
        let mut form = sample();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormInput::Submit);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormInput::Cancel);
    }

    #[test]
    fn test_ctrl_u_clears_field() {
        let mut form = sample();
        type_str(&mut form, "oops");
        form.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(form.value(0), "");
    }
}
