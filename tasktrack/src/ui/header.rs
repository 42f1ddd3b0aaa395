//! Dashboard header: welcome line, statistics row, search and filters.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme::Theme;
use crate::app::{App, Focus};
use crate::storage::KeyValueStore;

/// Rows taken by the header, borders included.
pub const HEIGHT: u16 = 5;

/// Render the header.
pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let name = app.username().unwrap_or_default();
    let mode = if app.dark_mode { "dark" } else { "light" };

    let welcome = Line::from(vec![
        Span::styled(format!("Welcome, {name}!"), theme.bold()),
        Span::raw("  "),
        Span::styled(format!("[{mode}]"), theme.dimmed()),
    ]);

    let stats = app.stats();
    let counters = Line::from(vec![
        Span::styled("Total: ", theme.dimmed()),
        Span::styled(stats.total.to_string(), theme.bold()),
        Span::styled("  Pending: ", theme.dimmed()),
        Span::styled(stats.pending.to_string(), theme.bold()),
        Span::styled("  Completed: ", theme.dimmed()),
        Span::styled(stats.completed.to_string(), theme.bold()),
    ]);

    let searching = app.focus == Focus::Search;
    let mut search = app.query.search.clone();
    if searching {
        search.push('█');
    }
    let search_span = if search.is_empty() {
        Span::styled("press / to search", theme.dimmed())
    } else {
        Span::styled(search, theme.normal())
    };
    let filters = Line::from(vec![
        Span::styled(
            "Search: ",
            if searching {
                theme.highlighted()
            } else {
                theme.dimmed()
            },
        ),
        search_span,
        Span::styled("  Status: ", theme.dimmed()),
        Span::styled(app.query.status.to_string(), theme.bold()),
        Span::styled("  Priority: ", theme.dimmed()),
        Span::styled(app.query.priority.to_string(), theme.bold()),
    ]);

    let block = Block::default()
        .title(" Task Tracker ")
        .borders(Borders::ALL)
        .border_style(theme.border(searching));

    frame.render_widget(
        Paragraph::new(vec![welcome, counters, filters]).block(block),
        area,
    );
}
