//! Terminal UI rendering.

pub mod header;
pub mod login;
pub mod modal;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    widgets::Block,
};

use crate::app::{App, Modal};
use crate::storage::KeyValueStore;
use theme::Theme;

/// Main draw function for the entire UI.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let theme = Theme::for_mode(app.dark_mode);
    frame.render_widget(Block::default().style(theme.normal()), frame.area());

    // Content above, status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    if app.session().is_logged_in() {
        let content_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(header::HEIGHT), Constraint::Min(3)])
            .split(main_chunks[0]);

        header::render(frame, content_chunks[0], app, &theme);
        task_list::render(frame, content_chunks[1], app, &theme);

        match &app.modal {
            Some(Modal::Form(form)) => modal::render_form(frame, form, &theme),
            Some(Modal::ConfirmDelete(id)) => {
                let title = app
                    .task_manager()
                    .and_then(|m| m.get(*id))
                    .map_or("", |t| t.title.as_str());
                modal::render_confirm(frame, title, &theme);
            }
            None => {}
        }
    } else {
        login::render(frame, main_chunks[0], app, &theme);
    }

    status_bar::render(frame, main_chunks[1], app, &theme);
}

/// A `width` x `height` rectangle centred in `area`, clipped to it.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
