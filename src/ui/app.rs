//! Terminal list viewer for the task list.
//!
//! Single-threaded event loop: draw when dirty, poll for key events,
//! dispatch store operations by the selected index. Quit saves first
//! when autosave is enabled; Ctrl+C quits without saving.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::Result;
use crate::store::TaskStore;

use super::editor::{EditorAction, EditorKind, EditorState};
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) index: usize,
    pub(crate) title: String,
}

pub struct AppState {
    pub(crate) store: TaskStore,
    pub(crate) selected: Option<usize>,
    pub(crate) editor: Option<EditorState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) status_message: Option<(StatusKind, String)>,
    pub(crate) show_help: bool,
    pub(crate) unsaved: bool,
    autosave: bool,
}

impl AppState {
    fn new(store: TaskStore, autosave: bool) -> Self {
        let selected = if store.is_empty() { None } else { Some(0) };
        Self {
            store,
            selected,
            editor: None,
            delete_confirm: None,
            status_message: None,
            show_help: false,
            unsaved: false,
            autosave,
        }
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status_message = Some((kind, message.into()));
    }

    fn clamp_selection(&mut self) {
        self.selected = match self.store.len() {
            0 => None,
            len => Some(self.selected.unwrap_or(0).min(len - 1)),
        };
    }

    fn select_next(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some((selected + 1).min(self.store.len().saturating_sub(1)));
        }
    }

    fn select_prev(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some(selected.saturating_sub(1));
        }
    }

    fn open_add_editor(&mut self) {
        self.editor = Some(EditorState::new_task());
    }

    fn open_edit_editor(&mut self) {
        if let Some(index) = self.selected {
            if let Some(task) = self.store.get(index) {
                self.editor = Some(EditorState::edit_task(index, &task.title));
            }
        }
    }

    fn open_delete_confirm(&mut self) {
        if let Some(index) = self.selected {
            if let Some(task) = self.store.get(index) {
                self.delete_confirm = Some(DeleteConfirmState {
                    index,
                    title: task.title.clone(),
                });
            }
        }
    }

    fn apply_editor(&mut self, editor: EditorState) {
        let kind = editor.kind();
        let index = editor.index();
        let title = editor.into_value();
        match kind {
            EditorKind::NewTask => {
                self.store.add(title);
                self.selected = Some(self.store.len() - 1);
                self.set_status(StatusKind::Info, "added task");
            }
            EditorKind::EditTask => {
                if let Some(index) = index {
                    self.store.edit(index, title);
                    self.set_status(StatusKind::Info, format!("edited task {index}"));
                }
            }
        }
        self.unsaved = true;
    }

    fn delete_selected(&mut self, index: usize) {
        self.store.delete(index);
        self.unsaved = true;
        self.clamp_selection();
        self.set_status(StatusKind::Info, format!("deleted task {index}"));
    }

    fn complete_selected(&mut self) {
        if let Some(index) = self.selected {
            self.store.mark_complete(index);
            self.unsaved = true;
            self.set_status(StatusKind::Info, format!("completed task {index}"));
        }
    }

    fn save(&mut self) {
        match self.store.save() {
            Ok(()) => {
                self.unsaved = false;
                self.set_status(
                    StatusKind::Info,
                    format!(
                        "saved {} tasks to {}",
                        self.store.len(),
                        self.store.path().display()
                    ),
                );
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    fn reload(&mut self) {
        match self.store.load() {
            Ok(()) => {
                self.unsaved = false;
                self.clamp_selection();
                self.set_status(StatusKind::Info, format!("loaded {} tasks", self.store.len()));
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    /// True when the loop should exit. A failed autosave keeps the
    /// viewer open with the error on the status line.
    fn request_quit(&mut self) -> bool {
        if self.autosave && self.unsaved {
            if let Err(err) = self.store.save() {
                self.set_status(
                    StatusKind::Error,
                    format!("{err} (Ctrl+C quits without saving)"),
                );
                return false;
            }
        }
        true
    }
}

/// Open the viewer over the given store. The store is the one the
/// caller constructed; there is no other instance behind the UI.
pub fn run(store: TaskStore, autosave: bool) -> Result<()> {
    let mut app = AppState::new(store, autosave);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.show_help {
        app.show_help = false;
        return false;
    }

    if let Some(mut editor) = app.editor.take() {
        match editor.handle_key(key) {
            EditorAction::None => app.editor = Some(editor),
            EditorAction::Cancel => {}
            EditorAction::Submit => app.apply_editor(editor),
        }
        return false;
    }

    if let Some(confirm) = app.delete_confirm.take() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.delete_selected(confirm.index),
            KeyCode::Char('n') | KeyCode::Esc => {}
            _ => app.delete_confirm = Some(confirm),
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return app.request_quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Home => app.selected = app.store.tasks().first().map(|_| 0),
        KeyCode::End => app.selected = app.store.len().checked_sub(1),
        KeyCode::Char('a') => app.open_add_editor(),
        KeyCode::Char('e') => app.open_edit_editor(),
        KeyCode::Char('d') => app.open_delete_confirm(),
        KeyCode::Char(' ') | KeyCode::Char('c') => app.complete_selected(),
        KeyCode::Char('s') => app.save(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            handle_key(app, key(KeyCode::Char(ch)));
        }
    }

    fn app_in(dir: &tempfile::TempDir, autosave: bool) -> AppState {
        let store = TaskStore::open(dir.path().join("tasks.json")).expect("open store");
        AppState::new(store, autosave)
    }

    #[test]
    fn add_flow_appends_and_selects_new_task() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir, true);

        handle_key(&mut app, key(KeyCode::Char('a')));
        assert!(app.editor.is_some());
        type_text(&mut app, "Buy milk");
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.editor.is_none());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].title, "Buy milk");
        assert_eq!(app.selected, Some(0));
        assert!(app.unsaved);
    }

    #[test]
    fn edit_flow_replaces_selected_title() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir, true);
        app.store.add("old");
        app.clamp_selection();

        handle_key(&mut app, key(KeyCode::Char('e')));
        let editor = app.editor.as_ref().expect("editor open");
        assert_eq!(editor.value(), "old");

        for _ in 0..3 {
            handle_key(&mut app, key(KeyCode::Backspace));
        }
        type_text(&mut app, "new");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.store.tasks()[0].title, "new");
    }

    #[test]
    fn delete_flow_requires_confirmation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir, true);
        app.store.add("A");
        app.store.add("B");
        app.clamp_selection();

        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.store.len(), 2);

        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].title, "B");
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn space_marks_selected_complete() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir, true);
        app.store.add("A");
        app.clamp_selection();

        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert!(app.store.tasks()[0].completed);
    }

    #[test]
    fn actions_on_empty_list_are_no_ops() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir, true);

        handle_key(&mut app, key(KeyCode::Char('e')));
        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Char(' ')));

        assert!(app.editor.is_none());
        assert!(app.delete_confirm.is_none());
        assert!(app.store.is_empty());
    }

    #[test]
    fn selection_stays_in_range() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir, true);
        app.store.add("A");
        app.store.add("B");
        app.clamp_selection();

        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected, Some(1));

        handle_key(&mut app, key(KeyCode::Up));
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn quit_saves_when_autosave_enabled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        let mut app = app_in(&dir, true);
        app.store.add("A");
        app.unsaved = true;

        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
        let fresh = TaskStore::open(&path).expect("reopen");
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn quit_without_autosave_leaves_file_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        let mut app = app_in(&dir, false);
        app.store.add("A");
        app.unsaved = true;

        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
        assert!(!path.exists());
    }

    #[test]
    fn save_key_writes_and_clears_unsaved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        let mut app = app_in(&dir, true);
        app.store.add("A");
        app.unsaved = true;

        handle_key(&mut app, key(KeyCode::Char('s')));
        assert!(!app.unsaved);
        assert!(path.exists());
    }

    #[test]
    fn reload_drops_unsaved_changes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir, true);
        app.store.add("A");
        handle_key(&mut app, key(KeyCode::Char('s')));

        app.store.add("B");
        app.unsaved = true;
        handle_key(&mut app, key(KeyCode::Char('r')));

        assert_eq!(app.store.len(), 1);
        assert!(!app.unsaved);
    }

    #[test]
    fn help_overlay_closes_on_any_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir, true);

        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, key(KeyCode::Char('a')));
        assert!(!app.show_help);
        assert!(app.editor.is_none());
    }
}
