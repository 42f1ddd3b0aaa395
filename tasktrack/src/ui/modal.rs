//! Dialogs drawn over the dashboard: the task form and delete confirmation.

use ratatui::{
    Frame,
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme::Theme;
use crate::app::{CONFIRM_DELETE_PROMPT, FormField, FormMode, TaskForm};

/// Render the create/edit form.
pub fn render_form(frame: &mut Frame, form: &TaskForm, theme: &Theme) {
    let area = super::centered(frame.area(), 60, 15);
    frame.render_widget(Clear, area);

    let title = match form.mode {
        FormMode::Add => " Add Task ",
        FormMode::Edit(_) => " Edit Task ",
    };

    let mut lines = Vec::with_capacity(FormField::ALL.len() * 2 + 3);
    lines.push(match &form.error {
        Some(err) => Line::from(Span::styled(err.as_str(), theme.error())),
        None => Line::raw(""),
    });

    for field in FormField::ALL {
        let active = field == form.field;
        let mut value = form.value(field);
        if active && field != FormField::Priority {
            value.push('█');
        }
        lines.push(Line::from(Span::styled(
            field.label(),
            if active {
                theme.highlighted()
            } else {
                theme.dimmed()
            },
        )));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(value, theme.normal()),
        ]));
    }

    lines.push(Line::from(Span::styled(
        "Tab: next field | ←→: priority | Enter: save | Esc: cancel",
        theme.dimmed(),
    )));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme.highlighted())
        .style(theme.normal());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the delete confirmation for the task titled `title`.
pub fn render_confirm(frame: &mut Frame, title: &str, theme: &Theme) {
    let area = super::centered(frame.area(), 60, 6);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(CONFIRM_DELETE_PROMPT, theme.bold())),
        Line::from(Span::styled(format!("\"{title}\""), theme.highlighted())),
        Line::from(Span::styled("y: delete | n: keep", theme.dimmed())),
    ];
    let block = Block::default()
        .title(" Delete Task ")
        .borders(Borders::ALL)
        .border_style(theme.error())
        .style(theme.normal());
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
