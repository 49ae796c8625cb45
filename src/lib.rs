//! tl - Task List Library
//!
//! This library provides the core functionality for the tl CLI tool:
//! an ordered, file-backed list of titled tasks with index-addressed
//! CRUD operations, plus the terminal list viewer built on it.
//!
//! # Core Concepts
//!
//! - **Task**: a title plus a completion flag, serialized as a
//!   two-field JSON record
//! - **TaskStore**: the in-memory ordered collection bound to a JSON
//!   backing file, with whole-file load/save
//! - **List viewer**: a crossterm/ratatui UI that renders the store
//!   and dispatches operations by selected index
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `config.toml`
//! - `error`: error types and result aliases
//! - `output`: shared CLI output formatting
//! - `store`: the file-backed task collection
//! - `task`: task records and their serialized form
//! - `ui`: terminal list viewer

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
