//! Login gate rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme::Theme;
use crate::app::App;
use crate::storage::KeyValueStore;

/// Render the name prompt, centred in `area`.
pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, theme: &Theme) {
    let area = super::centered(area, 44, 8);

    let mut input = app.login_input.clone();
    input.push('█');

    let message = match &app.login_error {
        Some(err) => Line::from(Span::styled(err.as_str(), theme.error())),
        None => Line::from(Span::styled(
            "Enter your name to see your tasks",
            theme.dimmed(),
        )),
    };

    let lines = vec![
        Line::from(Span::styled("Task Tracker", theme.bold())),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Name: ", theme.dimmed()),
            Span::styled(input, theme.bold()),
        ]),
        Line::raw(""),
        message,
    ];

    let block = Block::default()
        .title(" Login ")
        .borders(Borders::ALL)
        .border_style(theme.highlighted());

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
