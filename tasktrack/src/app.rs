//! Application state and event handling.
//!
//! [`App`] holds everything the UI draws. Key events are turned into an
//! [`Intent`] by [`App::handle_key_event`]; intents that change data are
//! carried out by [`App::dispatch`], which is the only place the session and
//! the task manager are mutated.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tasktrack_core::{Clock, Priority, Task, TaskDraft, TaskId, TaskQuery, TaskStats};

use crate::session::{Session, SessionState};
use crate::storage::{KeyValueStore, StoreAdapter};
use crate::tasks::{TaskError, TaskManager};

/// Prompt shown in the delete confirmation dialog.
pub const CONFIRM_DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// A data-changing request produced by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Log in as the given name.
    Login(String),
    /// Log out of the current session.
    Logout,
    /// Create a task.
    Add(TaskDraft),
    /// Edit an existing task.
    Update(TaskId, TaskDraft),
    /// Delete a task (already confirmed).
    Remove(TaskId),
    /// Flip a task's completion flag.
    ToggleComplete(TaskId),
}

/// Which dashboard element receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Task list navigation (default).
    List,
    /// Search box.
    Search,
}

/// Fields of the task form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Title (required).
    Title,
    /// Description.
    Description,
    /// Priority selector.
    Priority,
    /// Due date, `YYYY-MM-DD`.
    DueDate,
    /// Comma-separated tags.
    Tags,
}

impl FormField {
    /// All fields in tab order.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Description,
        Self::Priority,
        Self::DueDate,
        Self::Tags,
    ];

    /// Field label as displayed.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title *",
            Self::Description => "Description",
            Self::Priority => "Priority",
            Self::DueDate => "Due Date (YYYY-MM-DD)",
            Self::Tags => "Tags (comma separated)",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::Tags,
            Self::Tags => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Tags,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
            Self::DueDate => Self::Priority,
            Self::Tags => Self::DueDate,
        }
    }
}

/// Whether the form creates or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Create a new task.
    Add,
    /// Edit the task with this id.
    Edit(TaskId),
}

/// State of the create/edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Add or edit.
    pub mode: FormMode,
    /// Field values as typed.
    pub draft: TaskDraft,
    /// Field receiving keys.
    pub field: FormField,
    /// Inline validation message.
    pub error: Option<String>,
}

impl TaskForm {
    /// An empty form for a new task.
    #[must_use]
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            draft: TaskDraft::default(),
            field: FormField::Title,
            error: None,
        }
    }

    /// A form pre-filled from `task`.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            draft: TaskDraft::from_task(task),
            field: FormField::Title,
            error: None,
        }
    }

    /// Text shown for `field`.
    #[must_use]
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.draft.title.clone(),
            FormField::Description => self.draft.description.clone(),
            FormField::Priority => format!("< {} >", self.draft.priority),
            FormField::DueDate => self.draft.due_date.clone(),
            FormField::Tags => self.draft.tags.clone(),
        }
    }

    fn intent(&self) -> Intent {
        match self.mode {
            FormMode::Add => Intent::Add(self.draft.clone()),
            FormMode::Edit(id) => Intent::Update(id, self.draft.clone()),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.draft.title),
            FormField::Description => Some(&mut self.draft.description),
            FormField::DueDate => Some(&mut self.draft.due_date),
            FormField::Tags => Some(&mut self.draft.tags),
            FormField::Priority => None,
        }
    }

    fn set_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
    }

    /// Returns an intent when the form is submitted.
    fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Enter => return Some(self.intent()),
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Left if self.field == FormField::Priority => {
                self.set_priority(self.draft.priority.prev());
            }
            KeyCode::Right | KeyCode::Char(' ') if self.field == FormField::Priority => {
                self.set_priority(self.draft.priority.next());
            }
            KeyCode::Char(c) => {
                if self.field == FormField::Title {
                    self.error = None;
                }
                if let Some(text) = self.text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if self.field == FormField::Title {
                    self.error = None;
                }
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            _ => {}
        }
        None
    }
}

/// A dialog drawn over the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Create/edit form.
    Form(TaskForm),
    /// Delete confirmation for a task.
    ConfirmDelete(TaskId),
}

/// Main application state.
pub struct App<S> {
    session: SessionState<S>,
    adapter: StoreAdapter<S>,
    tasks: Option<TaskManager<S>>,
    clock: Rc<dyn Clock>,
    /// Text typed in the login gate.
    pub login_input: String,
    /// Message shown at the login gate.
    pub login_error: Option<String>,
    /// Active filters and search text.
    pub query: TaskQuery,
    /// Dashboard element receiving keys.
    pub focus: Focus,
    /// Index into the filtered view.
    pub selected: usize,
    /// Open dialog, if any.
    pub modal: Option<Modal>,
    /// One-line message in the status bar.
    pub status: Option<String>,
    /// Dark or light palette.
    pub dark_mode: bool,
    /// chrono format for created/updated timestamps.
    pub timestamp_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Creates the app, restoring any persisted session.
    #[must_use]
    pub fn new(adapter: StoreAdapter<S>, clock: impl Clock + 'static) -> Self {
        let clock: Rc<dyn Clock> = Rc::new(clock);
        let session = SessionState::restore(adapter.clone());
        let tasks = session
            .current()
            .username()
            .map(|name| TaskManager::open(adapter.clone(), name, Rc::clone(&clock)));
        Self {
            session,
            adapter,
            tasks,
            clock,
            login_input: String::new(),
            login_error: None,
            query: TaskQuery::default(),
            focus: Focus::List,
            selected: 0,
            modal: None,
            status: None,
            dark_mode: true,
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            should_quit: false,
        }
    }

    /// Sets the initial palette.
    #[must_use]
    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.dark_mode = dark;
        self
    }

    /// Sets the timestamp display format.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    /// The current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        self.session.current()
    }

    /// The logged-in username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.session.current().username()
    }

    /// The task manager of the logged-in user.
    #[must_use]
    pub const fn task_manager(&self) -> Option<&TaskManager<S>> {
        self.tasks.as_ref()
    }

    /// Tasks passing the current filters, in list order.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .as_ref()
            .map(|m| m.view(&self.query))
            .unwrap_or_default()
    }

    /// Counters over the unfiltered list.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        self.tasks
            .as_ref()
            .map(TaskManager::stats)
            .unwrap_or_default()
    }

    /// The highlighted task in the filtered view.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected).copied()
    }

    /// Handle a key event, returning an intent when data must change.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Intent> {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return None;
        }

        if !self.session.current().is_logged_in() {
            return self.handle_login_key(key);
        }

        match self.modal.as_mut() {
            Some(Modal::Form(form)) => {
                if key.code == KeyCode::Esc {
                    self.modal = None;
                    return None;
                }
                form.handle_key(key)
            }
            Some(Modal::ConfirmDelete(id)) => {
                let id = *id;
                match key.code {
                    KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                        self.modal = None;
                        Some(Intent::Remove(id))
                    }
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                        self.modal = None;
                        None
                    }
                    _ => None,
                }
            }
            None => match self.focus {
                Focus::Search => {
                    self.handle_search_key(key);
                    None
                }
                Focus::List => self.handle_list_key(key),
            },
        }
    }

    /// Carry out an intent against the session and the task manager.
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Login(name) => self.login(&name),
            Intent::Logout => self.logout(),
            Intent::Add(draft) => {
                let result = self.with_manager(|m| m.add(&draft));
                self.finish_form(result, "Task added");
            }
            Intent::Update(id, draft) => {
                let result = self.with_manager(|m| m.update(id, &draft));
                self.finish_form(result, "Task updated");
            }
            Intent::Remove(id) => {
                if let Some(Err(e)) = self.with_manager(|m| m.remove(id)) {
                    tracing::debug!(task_id = %id, error = %e, "remove ignored");
                } else {
                    self.status = Some("Task deleted".to_string());
                }
            }
            Intent::ToggleComplete(id) => {
                if let Some(Err(e)) = self.with_manager(|m| m.toggle_complete(id)) {
                    tracing::debug!(task_id = %id, error = %e, "toggle ignored");
                }
            }
        }
        self.collect_warnings();
        self.clamp_selection();
    }

    /// Convenience for the event loop: handle a key and dispatch its intent.
    pub fn on_key(&mut self, key: KeyEvent) {
        if let Some(intent) = self.handle_key_event(key) {
            self.dispatch(intent);
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => return Some(Intent::Login(self.login_input.clone())),
            KeyCode::Char(c) => {
                self.login_input.push(c);
                self.login_error = None;
            }
            KeyCode::Backspace => {
                self.login_input.pop();
            }
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Char(c) => self.query.search.push(c),
            KeyCode::Backspace => {
                self.query.search.pop();
            }
            _ => {}
        }
        self.clamp_selection();
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('s') => {
                self.query.status = self.query.status.next();
                self.clamp_selection();
            }
            KeyCode::Char('p') => {
                self.query.priority = self.query.priority.next();
                self.clamp_selection();
            }
            KeyCode::Char('t') => self.dark_mode = !self.dark_mode,
            KeyCode::Char('a') => self.modal = Some(Modal::Form(TaskForm::add())),
            KeyCode::Char('e') => {
                if let Some(form) = self.selected_task().map(TaskForm::edit) {
                    self.modal = Some(Modal::Form(form));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.modal = Some(Modal::ConfirmDelete(id));
                }
            }
            KeyCode::Char(' ' | 'x') => {
                return self.selected_task().map(|t| Intent::ToggleComplete(t.id));
            }
            KeyCode::Char('L') => return Some(Intent::Logout),
            _ => {}
        }
        None
    }

    fn login(&mut self, name: &str) {
        match self.session.login(name) {
            Ok(username) => {
                let username = username.to_string();
                self.tasks = Some(TaskManager::open(
                    self.adapter.clone(),
                    &username,
                    Rc::clone(&self.clock),
                ));
                self.login_input.clear();
                self.login_error = None;
                self.reset_dashboard();
                self.status = Some(format!("Welcome, {username}!"));
            }
            Err(e) => self.login_error = Some(e.to_string()),
        }
    }

    fn logout(&mut self) {
        self.session.logout();
        self.tasks = None;
        self.reset_dashboard();
        self.status = None;
    }

    fn reset_dashboard(&mut self) {
        self.query = TaskQuery::default();
        self.focus = Focus::List;
        self.selected = 0;
        self.modal = None;
    }

    fn with_manager<T>(
        &mut self,
        op: impl FnOnce(&mut TaskManager<S>) -> Result<T, TaskError>,
    ) -> Option<Result<T, TaskError>> {
        self.tasks.as_mut().map(op)
    }

    /// Closes the form on success; shows validation errors inline.
    fn finish_form(&mut self, result: Option<Result<Task, TaskError>>, done: &str) {
        match result {
            Some(Ok(_)) => {
                self.modal = None;
                self.status = Some(done.to_string());
            }
            Some(Err(TaskError::Validation(e))) => {
                if let Some(Modal::Form(form)) = self.modal.as_mut() {
                    form.error = Some(e.to_string());
                }
            }
            Some(Err(e @ TaskError::NotFound(_))) => {
                tracing::debug!(error = %e, "edit ignored");
                self.modal = None;
            }
            None => self.modal = None,
        }
    }

    fn collect_warnings(&mut self) {
        let warning = self
            .session
            .take_warning()
            .or_else(|| self.tasks.as_mut().and_then(TaskManager::take_warning));
        if warning.is_some() {
            self.status = warning;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.visible_tasks().len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}
