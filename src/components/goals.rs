use alloy::primitives::Address;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::components::form::{Field, Form, FormError};
use crate::components::section::{Section, SectionText};
use crate::data::types::{Goal, GoalState, RecordKind, WriteCall, is_owner};
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

const TITLE: usize = 0;
const DESCRIPTION: usize = 1;
const TARGET_DATE: usize = 2;

const TEXT: SectionText = SectionText {
    action: "Add Goal",
    empty: "No learning goals yet",
    success: "Goal added successfully!",
};

pub struct GoalsView {
    pub section: Section<Goal>,
}

impl GoalsView {
    pub fn new() -> Self {
        let form = Form::new(vec![
            Field::text("Goal Title").required().placeholder("e.g., Master React Hooks"),
            Field::text("Description").placeholder("What do you want to achieve?"),
            Field::date("Target Date").required(),
        ]);
        Self {
            section: Section::new(RecordKind::Goal, form),
        }
    }

    /// The `addGoal` call; the target date is sent as UTC midnight in seconds.
    pub fn build_call(form: &Form) -> Result<WriteCall, FormError> {
        form.check_required()?;
        Ok(WriteCall::AddGoal {
            title: form.value(TITLE).to_string(),
            description: form.value(DESCRIPTION).to_string(),
            target_date: form.date(TARGET_DATE)?,
        })
    }

    fn mark_selected_achieved(&mut self) -> Option<AppEvent> {
        let account = self.section.account;
        let goal = self.section.selected_record()?;
        if !can_mark_achieved(account, goal) {
            return None;
        }
        let id = goal.id;
        match self.section.start_write(WriteCall::MarkGoalAchieved { id }) {
            Ok(event) => Some(event),
            Err(e) => Some(AppEvent::Error(e.to_string())),
        }
    }
}

/// Only the goal's owner may tick it off, and only once.
pub fn can_mark_achieved(account: Option<Address>, goal: &Goal) -> bool {
    is_owner(account, goal.owner) && !goal.achieved
}

fn goal_item(goal: &Goal, selected: bool, account: Option<Address>, now: u64) -> ListItem<'static> {
    let state = goal.state(now);
    let checkbox = match state {
        GoalState::Achieved => Span::styled("[x] ", THEME.success_style()),
        _ => Span::styled("[ ] ", THEME.muted_style()),
    };

    let mut title = vec![checkbox, Span::styled(goal.title.clone(), THEME.goal_style(state))];
    match state {
        GoalState::Achieved => title.push(Span::styled("  Achieved", THEME.success_style())),
        GoalState::Overdue => title.push(Span::styled("  Overdue", THEME.error_style())),
        GoalState::Open => {}
    }
    let mut lines = vec![Line::from(title)];

    if !goal.description.is_empty() {
        let style = match state {
            GoalState::Achieved => THEME.goal_style(state),
            _ => Style::default().fg(THEME.text),
        };
        lines.push(Line::from(Span::styled(
            format!("    {}", goal.description),
            style,
        )));
    }

    let target_style = match state {
        GoalState::Overdue => THEME.error_style().add_modifier(Modifier::BOLD),
        _ => THEME.accent_style().add_modifier(Modifier::BOLD),
    };
    lines.push(Line::from(vec![
        Span::styled("    Target: ", THEME.muted_style()),
        Span::styled(utils::format_date(goal.target_date), target_style),
    ]));

    if selected && can_mark_achieved(account, goal) {
        lines.push(Line::from(Span::styled(
            "    [x] mark achieved",
            THEME.muted_style(),
        )));
    }

    lines.push(Line::from(Span::styled(
        format!("    Set {}", utils::format_time_ago(goal.timestamp)),
        THEME.muted_style(),
    )));
    lines.push(Line::from(""));
    ListItem::new(lines)
}

impl Component for GoalsView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if self.section.show_form {
            return self.section.handle_form_key(key, Self::build_call);
        }
        if self.section.handle_list_key(key) {
            return None;
        }
        match key.code {
            KeyCode::Char('a') => {
                self.section.toggle_form();
                None
            }
            KeyCode::Char('x') => self.mark_selected_achieved(),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let account = self.section.account;
        let now = utils::now_unix();
        self.section.render(frame, area, &TEXT, |goal, selected| {
            goal_item(goal, selected, account, now)
        });
    }
}
