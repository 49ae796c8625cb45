//! tl task command implementations.
//!
//! Each command opens the store (which auto-loads), applies one
//! mutation, saves, and reports through the shared output layer.
//! Out-of-range indices leave the list unchanged; the command still
//! succeeds and says so, matching the store's silent no-op policy.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, OutputOptions};
use crate::store::TaskStore;
use crate::ui;

pub struct AddOptions {
    pub title: String,
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct LsOptions {
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub index: usize,
    pub title: String,
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub index: usize,
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DoneOptions {
    pub index: usize,
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct UiOptions {
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Serialize)]
struct TaskRow {
    index: usize,
    title: String,
    completed: bool,
}

#[derive(Serialize)]
struct ListReport {
    tasks: Vec<TaskRow>,
    total: usize,
}

#[derive(Serialize)]
struct AddReport {
    index: usize,
    title: String,
    total: usize,
}

#[derive(Serialize)]
struct MutationReport {
    index: usize,
    applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    total: usize,
}

fn open_store(file: Option<&Path>, config: Option<&Path>) -> Result<(TaskStore, Config)> {
    let config_path = match config {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)?;
    let tasks_file = config.resolve_tasks_file(file)?;
    let store = TaskStore::open(tasks_file)?;
    Ok((store, config))
}

fn require_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument(
            "task title cannot be empty".to_string(),
        ));
    }
    Ok(title.to_string())
}

fn out_of_range_notice(index: usize, total: usize) -> String {
    format!("no task at index {index} (list has {total})")
}

/// Append a task and save.
pub fn run_add(options: AddOptions) -> Result<()> {
    let title = require_title(&options.title)?;
    let (mut store, _) = open_store(options.file.as_deref(), options.config.as_deref())?;

    store.add(title.clone());
    store.save()?;

    let index = store.len() - 1;
    let report = AddReport {
        index,
        title: title.clone(),
        total: store.len(),
    };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &report,
        &[format!("added task {index}: {title}")],
    )
}

/// Print the ordered list with indices and completion markers.
pub fn run_ls(options: LsOptions) -> Result<()> {
    let (store, _) = open_store(options.file.as_deref(), options.config.as_deref())?;

    let rows: Vec<TaskRow> = store
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| TaskRow {
            index,
            title: task.title.clone(),
            completed: task.completed,
        })
        .collect();
    let report = ListReport {
        total: rows.len(),
        tasks: rows,
    };

    let mut human: Vec<String> = store
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| format!("{index:>3}  {task}"))
        .collect();
    if human.is_empty() {
        human.push("no tasks".to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "ls",
        &report,
        &human,
    )
}

/// Retitle the task at an index and save.
pub fn run_edit(options: EditOptions) -> Result<()> {
    let title = require_title(&options.title)?;
    let (mut store, _) = open_store(options.file.as_deref(), options.config.as_deref())?;

    let applied = options.index < store.len();
    store.edit(options.index, title.clone());
    if applied {
        store.save()?;
    }

    let human = if applied {
        format!("edited task {}: {title}", options.index)
    } else {
        out_of_range_notice(options.index, store.len())
    };
    let report = MutationReport {
        index: options.index,
        applied,
        title: applied.then_some(title),
        total: store.len(),
    };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &report,
        &[human],
    )
}

/// Delete the task at an index and save.
pub fn run_rm(options: RmOptions) -> Result<()> {
    let (mut store, _) = open_store(options.file.as_deref(), options.config.as_deref())?;

    let removed = store.get(options.index).map(|task| task.title.clone());
    store.delete(options.index);
    if removed.is_some() {
        store.save()?;
    }

    let human = match &removed {
        Some(title) => format!("deleted task {}: {title}", options.index),
        None => out_of_range_notice(options.index, store.len()),
    };
    let report = MutationReport {
        index: options.index,
        applied: removed.is_some(),
        title: removed,
        total: store.len(),
    };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "rm",
        &report,
        &[human],
    )
}

/// Mark the task at an index complete and save.
pub fn run_done(options: DoneOptions) -> Result<()> {
    let (mut store, _) = open_store(options.file.as_deref(), options.config.as_deref())?;

    let applied = options.index < store.len();
    store.mark_complete(options.index);
    if applied {
        store.save()?;
    }

    let human = match store.get(options.index) {
        Some(task) => format!("completed task {}: {}", options.index, task.title),
        None => out_of_range_notice(options.index, store.len()),
    };
    let report = MutationReport {
        index: options.index,
        applied,
        title: store.get(options.index).map(|task| task.title.clone()),
        total: store.len(),
    };
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "done",
        &report,
        &[human],
    )
}

/// Open the terminal list viewer.
pub fn run_ui(options: UiOptions) -> Result<()> {
    let (store, config) = open_store(options.file.as_deref(), options.config.as_deref())?;
    ui::run(store, config.autosave)
}
