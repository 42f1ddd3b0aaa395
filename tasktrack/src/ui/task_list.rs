//! Task list rendering.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tasktrack_core::{DUE_DATE_FORMAT, Task};

use super::theme::Theme;
use crate::app::{App, Focus};
use crate::storage::KeyValueStore;

/// Shown when the filtered view is empty.
pub const EMPTY_MESSAGE: &str = "No tasks found.";

/// Render the filtered task list.
pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let tasks = app.visible_tasks();
    let block = Block::default()
        .title(format!(" Tasks ({}) ", tasks.len()))
        .borders(Borders::ALL)
        .border_style(theme.border(app.focus == Focus::List && app.modal.is_none()));

    if tasks.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(EMPTY_MESSAGE, theme.dimmed())))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| task_item(task, i == app.selected, &app.timestamp_format, theme))
        .collect();

    // The list scrolls so the selected row stays on screen.
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn task_item<'a>(task: &'a Task, selected: bool, format: &str, theme: &Theme) -> ListItem<'a> {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };
    let title_style = if task.completed {
        theme.completed()
    } else {
        theme.bold()
    };
    let marker = if selected { "> " } else { "  " };

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, theme.highlighted()),
        Span::styled(checkbox, theme.normal()),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", task.priority),
            theme.bold().fg(theme.priority_color(task.priority)),
        ),
    ])];

    if !task.description.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("      "),
            Span::styled(task.description.as_str(), theme.normal()),
        ]));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "      Due: {} | Tags: {} | Created: {} | Updated: {}",
            due_label(task),
            tags_label(task),
            format_timestamp(task.created_at, format),
            format_timestamp(task.updated_at, format),
        ),
        theme.dimmed(),
    )));

    let item = ListItem::new(lines);
    if selected {
        item.style(theme.selected())
    } else {
        item
    }
}

/// Due date as `YYYY-MM-DD`, or "N/A".
#[must_use]
pub fn due_label(task: &Task) -> String {
    task.due_date.map_or_else(
        || "N/A".to_string(),
        |d| d.format(DUE_DATE_FORMAT).to_string(),
    )
}

/// Tags joined with ", ", or "None".
#[must_use]
pub fn tags_label(task: &Task) -> String {
    if task.tags.is_empty() {
        "None".to_string()
    } else {
        task.tags.join(", ")
    }
}

/// Formats `instant` in local time with a chrono format string.
///
/// An invalid format string falls back to RFC 3339.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", instant.with_timezone(&Local).format(format)).is_err() {
        return instant.to_rfc3339();
    }
    out
}
