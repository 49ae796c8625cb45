//! Command-line interface for tl
//!
//! This module defines the CLI structure using clap derive macros.
//! Task command implementations live in the `task` submodule.

use clap::{Parser, Subcommand};

use crate::error::Result;

mod task;

/// tl - Task List
///
/// A single-user task list: add, edit, delete, and complete titled
/// tasks kept in a JSON file. Run without a subcommand to open the
/// list viewer.
#[derive(Parser, Debug)]
#[command(name = "tl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the tasks file (defaults to the configured location)
    #[arg(long, global = true, env = "TL_FILE")]
    pub file: Option<std::path::PathBuf>,

    /// Path to the config file
    #[arg(long, global = true, env = "TL_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task title
        title: String,
    },

    /// List tasks with their indices
    Ls,

    /// Replace the title of the task at INDEX
    Edit {
        /// Zero-based position in the list
        index: usize,

        /// New task title
        title: String,
    },

    /// Delete the task at INDEX
    Rm {
        /// Zero-based position in the list
        index: usize,
    },

    /// Mark the task at INDEX as complete
    Done {
        /// Zero-based position in the list
        index: usize,
    },

    /// Open the terminal list viewer
    Ui,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Add { title }) => task::run_add(task::AddOptions {
                title,
                file: self.file,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Some(Commands::Ls) => task::run_ls(task::LsOptions {
                file: self.file,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Some(Commands::Edit { index, title }) => task::run_edit(task::EditOptions {
                index,
                title,
                file: self.file,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Some(Commands::Rm { index }) => task::run_rm(task::RmOptions {
                index,
                file: self.file,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Some(Commands::Done { index }) => task::run_done(task::DoneOptions {
                index,
                file: self.file,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Some(Commands::Ui) | None => task::run_ui(task::UiOptions {
                file: self.file,
                config: self.config,
            }),
        }
    }
}
