//! Integration tests for the terminal front end.
//!
//! Drives the app with key events and renders it into ratatui's
//! `TestBackend` to check what the user would see.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use tasktrack::app::{App, Focus, Modal};
use tasktrack::storage::{MemoryStore, StoreAdapter};
use tasktrack::ui;
use tasktrack_core::{PriorityFilter, StatusFilter, SystemClock};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn press(app: &mut App<MemoryStore>, code: KeyCode) {
    app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App<MemoryStore>, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn new_app() -> App<MemoryStore> {
    App::new(StoreAdapter::new(MemoryStore::new()), SystemClock)
}

fn logged_in(name: &str) -> App<MemoryStore> {
    let mut app = new_app();
    type_text(&mut app, name);
    press(&mut app, KeyCode::Enter);
    app
}

fn add_via_form(app: &mut App<MemoryStore>, title: &str) {
    press(app, KeyCode::Char('a'));
    type_text(app, title);
    press(app, KeyCode::Enter);
}

/// Renders one frame and returns the screen as text, one line per row.
fn screen(app: &App<MemoryStore>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Login gate
// ---------------------------------------------------------------------------

#[test]
fn login_gate_is_shown_first() {
    let app = new_app();
    let text = screen(&app);
    assert!(text.contains("Task Tracker"));
    assert!(text.contains("Name:"));
    assert!(!text.contains("Welcome"));
}

#[test]
fn blank_name_shows_message_on_gate() {
    let mut app = new_app();
    press(&mut app, KeyCode::Enter);
    assert!(screen(&app).contains("Please enter a name"));
}

#[test]
fn login_shows_dashboard() {
    let app = logged_in("alice");
    let text = screen(&app);
    assert!(text.contains("Welcome, alice!"));
    assert!(text.contains("Total: 0"));
    assert!(text.contains("No tasks found."));
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[test]
fn added_task_row_shows_placeholders() {
    let mut app = logged_in("alice");
    add_via_form(&mut app, "Buy milk");
    let text = screen(&app);
    assert!(text.contains("[ ] Buy milk [Medium]"));
    assert!(text.contains("Due: N/A | Tags: None"));
    assert!(text.contains("Total: 1  Pending: 1  Completed: 0"));
}

#[test]
fn form_shows_validation_message() {
    let mut app = logged_in("alice");
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.modal, Some(Modal::Form(_))));
    let text = screen(&app);
    assert!(text.contains("Add Task"));
    assert!(text.contains("Title is required"));
}

#[test]
fn form_escape_cancels_without_adding() {
    let mut app = logged_in("alice");
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "never saved");
    press(&mut app, KeyCode::Esc);
    assert!(app.modal.is_none());
    assert_eq!(app.stats().total, 0);
    assert!(!app.should_quit);
}

#[test]
fn delete_asks_for_confirmation() {
    let mut app = logged_in("alice");
    add_via_form(&mut app, "Doomed");
    press(&mut app, KeyCode::Char('d'));
    assert!(screen(&app).contains("Are you sure you want to delete this task?"));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.stats().total, 1);

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.stats().total, 0);
    assert!(screen(&app).contains("No tasks found."));
}

#[test]
fn selection_past_the_fold_scrolls_into_view() {
    let mut app = logged_in("alice");
    for i in 0..20 {
        add_via_form(&mut app, &format!("Task number {i:02}"));
    }
    for _ in 0..19 {
        press(&mut app, KeyCode::Down);
    }
    assert_eq!(
        app.selected_task().map(|t| t.title.as_str()),
        Some("Task number 19")
    );

    let text = screen(&app);
    assert!(text.contains("Task number 19"), "selected row is off screen");
    assert!(!text.contains("Task number 00"));
}

#[test]
fn delete_confirmation_names_the_task() {
    let mut app = logged_in("alice");
    add_via_form(&mut app, "Keep this one");
    add_via_form(&mut app, "Remove that one");
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('d'));

    let text = screen(&app);
    assert!(text.contains("Are you sure you want to delete this task?"));
    assert!(text.contains("\"Remove that one\""));
    assert!(!text.contains("\"Keep this one\""));
}

#[test]
fn toggle_shows_checked_box_and_counts() {
    let mut app = logged_in("alice");
    add_via_form(&mut app, "Done soon");
    press(&mut app, KeyCode::Char('x'));
    let text = screen(&app);
    assert!(text.contains("[✓]"));
    assert!(text.contains("Pending: 0  Completed: 1"));
}

#[test]
fn filter_keys_cycle_and_render() {
    let mut app = logged_in("alice");
    press(&mut app, KeyCode::Char('s'));
    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.query.status, StatusFilter::Pending);
    assert!(matches!(app.query.priority, PriorityFilter::Only(_)));
    let text = screen(&app);
    assert!(text.contains("Status: Pending"));
    assert!(text.contains("Priority: Low"));
}

#[test]
fn search_narrows_rendered_list() {
    let mut app = logged_in("alice");
    add_via_form(&mut app, "Buy milk");
    add_via_form(&mut app, "Write report");

    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.focus, Focus::Search);
    type_text(&mut app, "milk");
    press(&mut app, KeyCode::Enter);

    let text = screen(&app);
    assert!(text.contains("Buy milk"));
    assert!(!text.contains("Write report"));
    // Stats are over the whole list, not the filtered view.
    assert!(text.contains("Total: 2"));
}

#[test]
fn theme_toggle_changes_indicator() {
    let mut app = logged_in("alice");
    assert!(screen(&app).contains("[dark]"));
    press(&mut app, KeyCode::Char('t'));
    assert!(!app.dark_mode);
    assert!(screen(&app).contains("[light]"));
}

#[test]
fn logout_returns_to_gate() {
    let mut app = logged_in("alice");
    add_via_form(&mut app, "kept");
    press(&mut app, KeyCode::Char('L'));
    let text = screen(&app);
    assert!(text.contains("Name:"));
    assert!(!text.contains("kept"));

    type_text(&mut app, "alice");
    press(&mut app, KeyCode::Enter);
    assert!(screen(&app).contains("kept"));
}

#[test]
fn quit_keys() {
    let mut app = logged_in("alice");
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);

    let mut gate = new_app();
    press(&mut gate, KeyCode::Esc);
    assert!(gate.should_quit);
}
