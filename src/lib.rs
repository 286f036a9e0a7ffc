//! `taskdash` - Marker-based task dashboard library
//!
//! This crate provides the CLI surface for the `td` tool on top of
//! [`taskdash_core`], which owns the document parsing and splicing.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Workspace configuration management
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
