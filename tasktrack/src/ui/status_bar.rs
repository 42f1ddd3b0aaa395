//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Theme;
use crate::app::{App, Focus, Modal};
use crate::storage::KeyValueStore;

/// Render the status bar at the bottom of the screen.
pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let help_text = if !app.session().is_logged_in() {
        "Enter: log in | Esc: quit"
    } else {
        match (&app.modal, app.focus) {
            (Some(Modal::Form(_)), _) => "Enter: save | Esc: cancel",
            (Some(Modal::ConfirmDelete(_)), _) => "y: delete | n: keep",
            (None, Focus::Search) => "type to search | Enter/Esc: done",
            (None, Focus::List) => {
                "a: add | e: edit | d: delete | space: toggle | /: search | s/p: filter | t: theme | L: logout | q: quit"
            }
        }
    };

    let mut spans = vec![
        Span::styled(
            concat!("Tasktrack v", env!("CARGO_PKG_VERSION")),
            theme.bold(),
        ),
        Span::raw(" | "),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(status.as_str(), theme.highlighted()));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(help_text, theme.dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme.status_bar());
    frame.render_widget(paragraph, area);
}
