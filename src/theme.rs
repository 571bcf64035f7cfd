use ratatui::style::{Color, Modifier, Style};

use crate::data::types::GoalState;

pub struct Theme {
    pub bg: Color,
    pub surface: Color,
    pub surface_bright: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_accent: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub fee_value: Color,
    pub address_color: Color,
    pub primary: Color,
    pub tag: Color,
}

pub const THEME: Theme = Theme {
    bg: Color::Rgb(18, 12, 36),
    surface: Color::Rgb(30, 22, 56),
    surface_bright: Color::Rgb(46, 34, 82),
    text: Color::Rgb(226, 224, 236),
    text_muted: Color::Rgb(140, 136, 160),
    text_accent: Color::Rgb(167, 139, 250),
    success: Color::Rgb(74, 222, 128),
    error: Color::Rgb(248, 113, 113),
    warning: Color::Yellow,
    selected_bg: Color::Rgb(60, 44, 110),
    selected_fg: Color::White,
    border: Color::Rgb(70, 60, 100),
    border_focused: Color::Rgb(139, 92, 246),
    fee_value: Color::Rgb(98, 126, 234),
    address_color: Color::Rgb(255, 179, 71),
    primary: Color::Rgb(124, 58, 237),
    tag: Color::Rgb(96, 165, 250),
};

impl Theme {
    pub const fn header_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.surface)
    }

    pub const fn selected_style(&self) -> Style {
        Style::new().fg(self.selected_fg).bg(self.selected_bg).add_modifier(Modifier::BOLD)
    }

    pub const fn border_style(&self) -> Style {
        Style::new().fg(self.border)
    }

    pub const fn border_focused_style(&self) -> Style {
        Style::new().fg(self.border_focused)
    }

    pub const fn muted_style(&self) -> Style {
        Style::new().fg(self.text_muted)
    }

    pub const fn accent_style(&self) -> Style {
        Style::new().fg(self.text_accent)
    }

    pub const fn success_style(&self) -> Style {
        Style::new().fg(self.success)
    }

    pub const fn error_style(&self) -> Style {
        Style::new().fg(self.error)
    }

    pub const fn fee_style(&self) -> Style {
        Style::new().fg(self.fee_value).add_modifier(Modifier::BOLD)
    }

    pub const fn address_style(&self) -> Style {
        Style::new().fg(self.address_color)
    }

    pub const fn title_style(&self) -> Style {
        Style::new().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub const fn tag_style(&self) -> Style {
        Style::new().fg(self.tag)
    }

    /// Course progress bars turn green once the course is complete.
    pub const fn progress_style(&self, completed: bool) -> Style {
        if completed {
            Style::new().fg(self.success)
        } else {
            Style::new().fg(self.primary)
        }
    }

    pub const fn goal_style(&self, state: GoalState) -> Style {
        match state {
            GoalState::Achieved => Style::new().fg(self.text_muted).add_modifier(Modifier::CROSSED_OUT),
            GoalState::Overdue => Style::new().fg(self.error).add_modifier(Modifier::BOLD),
            GoalState::Open => Style::new().fg(self.text),
        }
    }
}
