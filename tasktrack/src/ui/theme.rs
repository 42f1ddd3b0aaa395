//! Theme and styling for the TUI.
//!
//! Two palettes, dark and light, toggled at runtime with `t`.

use ratatui::style::{Color, Modifier, Style};
use tasktrack_core::Priority;

/// Colors of one palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground.
    pub fg: Color,
    /// Dimmed foreground (metadata, placeholders).
    pub fg_dim: Color,
    /// Background.
    pub bg: Color,
    /// Focused borders and selection.
    pub highlight: Color,
    /// Status bar background.
    pub bar_bg: Color,
    /// Validation errors and destructive prompts.
    pub error: Color,
    /// Completed tasks and confirmations.
    pub success: Color,
}

/// Palette for dark terminals.
pub const DARK: Theme = Theme {
    fg: Color::White,
    fg_dim: Color::Gray,
    bg: Color::Black,
    highlight: Color::Cyan,
    bar_bg: Color::Rgb(30, 30, 50),
    error: Color::Red,
    success: Color::Green,
};

/// Palette for light terminals.
pub const LIGHT: Theme = Theme {
    fg: Color::Black,
    fg_dim: Color::DarkGray,
    bg: Color::White,
    highlight: Color::Blue,
    bar_bg: Color::Rgb(220, 220, 235),
    error: Color::Rgb(180, 0, 0),
    success: Color::Rgb(0, 120, 0),
};

impl Theme {
    /// The palette for the given mode.
    #[must_use]
    pub const fn for_mode(dark: bool) -> Self {
        if dark { DARK } else { LIGHT }
    }

    /// Normal text style.
    #[must_use]
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style (timestamps, metadata).
    #[must_use]
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Bold text style.
    #[must_use]
    pub fn bold(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Highlighted text style (focused borders).
    #[must_use]
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row style.
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Completed task title.
    #[must_use]
    pub fn completed(&self) -> Style {
        Style::default()
            .fg(self.fg_dim)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Inline error messages.
    #[must_use]
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Status bar background.
    #[must_use]
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bar_bg)
    }

    /// Border style, highlighted when focused.
    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.highlighted()
        } else {
            Style::default().fg(self.fg_dim)
        }
    }

    /// Badge color for a priority.
    #[must_use]
    pub const fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.success,
            Priority::Medium => Color::Yellow,
            Priority::High => self.error,
        }
    }
}
