//! File-backed task storage.
//!
//! The store owns the ordered in-memory task list and the whole-file
//! load/save cycle against a JSON backing file. Insertion order is the
//! display and storage order and survives save/load. Index-addressed
//! mutations silently ignore out-of-range indices; that swallow is
//! part of the contract, not a missing check.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::task::Task;

/// The in-memory ordered task collection plus persistence operations.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    path: PathBuf,
}

impl TaskStore {
    /// Bind a store to a backing file and load whatever is there.
    ///
    /// A missing file is not an error: the store starts empty and the
    /// file appears on the first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self {
            tasks: Vec::new(),
            path: path.into(),
        };
        store.load()?;
        Ok(store)
    }

    /// Path of the backing file, fixed at construction.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the ordered task list, for rendering.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Replace the in-memory list with the contents of the backing file.
    ///
    /// A missing file leaves the current list unchanged. An unreadable
    /// or malformed file is an error; the current list is also left
    /// unchanged in that case.
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "tasks file absent, keeping current list");
            return Ok(());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| Error::ReadTasks {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<Value> =
            serde_json::from_str(&content).map_err(|source| Error::ParseTasks {
                path: self.path.clone(),
                source,
            })?;
        let tasks = records
            .iter()
            .map(Task::from_record)
            .collect::<Result<Vec<_>>>()?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        self.tasks = tasks;
        Ok(())
    }

    /// Append a new incomplete task. Never fails and does not save.
    pub fn add(&mut self, title: impl Into<String>) {
        self.tasks.push(Task::new(title));
    }

    /// Replace the title at `index`, keeping its completion flag.
    pub fn edit(&mut self, index: usize, new_title: impl Into<String>) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.title = new_title.into();
        }
    }

    /// Remove the task at `index`, shifting later tasks down.
    pub fn delete(&mut self, index: usize) {
        if index < self.tasks.len() {
            self.tasks.remove(index);
        }
    }

    /// Set the completion flag at `index`. Idempotent; there is no
    /// operation that clears the flag again.
    pub fn mark_complete(&mut self, index: usize) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.completed = true;
        }
    }

    /// Write the full ordered list to the backing file, replacing any
    /// previous content.
    pub fn save(&self) -> Result<()> {
        let records: Vec<Value> = self.tasks.iter().map(Task::to_record).collect();
        let json = serde_json::to_string_pretty(&records)?;
        self.write_atomic(json.as_bytes())
            .map_err(|source| Error::WriteTasks {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    /// Temp file + rename: the backing file is either fully replaced
    /// or untouched.
    fn write_atomic(&self, data: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)
    }
}
