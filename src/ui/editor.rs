//! Title editor for the list viewer: a single required field used by
//! both the add and edit flows.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    NewTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    kind: EditorKind,
    value: String,
    error: Option<String>,
    index: Option<usize>,
}

impl EditorState {
    pub fn new_task() -> Self {
        Self {
            kind: EditorKind::NewTask,
            value: String::new(),
            error: None,
            index: None,
        }
    }

    pub fn edit_task(index: usize, current: &str) -> Self {
        Self {
            kind: EditorKind::EditTask,
            value: current.to_string(),
            error: None,
            index: Some(index),
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    /// Index being edited; `None` for a new task.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            EditorKind::NewTask => "New Task",
            EditorKind::EditTask => "Edit Task",
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Esc => EditorAction::Cancel,
            KeyCode::Enter => {
                if self.value.trim().is_empty() {
                    self.error = Some("title is required".to_string());
                    EditorAction::None
                } else {
                    EditorAction::Submit
                }
            }
            KeyCode::Backspace => {
                self.value.pop();
                self.error = None;
                EditorAction::None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
                self.error = None;
                EditorAction::None
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(ch);
                self.error = None;
                EditorAction::None
            }
            _ => EditorAction::None,
        }
    }

    /// Trimmed field value, for submission.
    pub fn into_value(self) -> String {
        self.value.trim().to_string()
    }
}
